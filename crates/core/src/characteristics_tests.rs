// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn max_heat_minutes_is_none_without_a_fitted_velocity() {
    let chars = HeatingCharacteristics::default();
    assert!(chars.max_heat_minutes(104.0).is_none());
}

#[test]
fn max_heat_minutes_includes_lag_and_safety_margin() {
    let chars = HeatingCharacteristics {
        heating_velocity_f_per_min: Some(0.5),
        startup_lag_minutes: Some(3.0),
        ..Default::default()
    };
    // (104 - 58) / 0.5 + 3 + 15 = 92 + 18 = 110
    let minutes = chars.max_heat_minutes(104.0).unwrap();
    assert!((minutes - 110.0).abs() < 1e-9, "got {minutes}");
}

#[test]
fn non_positive_velocity_yields_no_estimate() {
    let chars = HeatingCharacteristics { heating_velocity_f_per_min: Some(0.0), ..Default::default() };
    assert!(chars.max_heat_minutes(100.0).is_none());
}
