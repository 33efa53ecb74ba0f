// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn normalize_strips_exactly_one_trailing_slash() {
    assert_eq!(normalize_api_base_url("http://host/"), "http://host");
    assert_eq!(normalize_api_base_url("http://host"), "http://host");
}

#[test]
fn endpoint_plus_base_never_double_slashes() {
    let base = normalize_api_base_url("http://host.local/");
    let joined = format!("{base}{}", JobAction::HeatOn.endpoint());
    assert!(!joined.contains("//"), "joined url had a double slash: {joined}");
}

#[test]
fn display_matches_wire_action_names() {
    assert_eq!(JobAction::HeatOn.to_string(), "heat-on");
    assert_eq!(JobAction::WakeUp.to_string(), "wake-up");
}

#[test]
fn new_record_normalizes_base_url_and_sets_endpoint() {
    let record = JobRecord::new(
        JobId::one_off(),
        JobAction::PumpOn,
        "http://host/",
        false,
        Utc::now(),
        Utc::now(),
        BTreeMap::new(),
    );
    assert_eq!(record.api_base_url, "http://host");
    assert_eq!(record.endpoint, "/equipment/pump/on");
    assert!(record.healthcheck_uuid.is_none());
}
