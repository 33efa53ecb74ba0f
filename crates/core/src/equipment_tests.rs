// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn pump_stays_on_before_the_window_elapses() {
    let now = Utc::now();
    let mut status = EquipmentStatus::default();
    status.set_pump(true, now);
    let changed = status.apply_pump_auto_off(now + Duration::minutes(119));
    assert!(!changed);
    assert!(status.pump.on);
}

#[test]
fn pump_turns_off_after_two_hours_and_persists_the_adjusted_timestamp() {
    let start = Utc::now();
    let mut status = EquipmentStatus::default();
    status.set_pump(true, start);
    let now = start + Duration::hours(3);
    let changed = status.apply_pump_auto_off(now);
    assert!(changed);
    assert!(!status.pump.on);
    assert_eq!(status.pump.last_changed_at, Some(start + PUMP_AUTO_OFF));
}

#[test]
fn heater_has_no_auto_off() {
    let start = Utc::now();
    let mut status = EquipmentStatus::default();
    status.set_heater(true, start);
    // apply_pump_auto_off only ever touches the pump relay.
    status.apply_pump_auto_off(start + Duration::hours(10));
    assert!(status.heater.on);
}

#[test]
fn auto_off_is_a_no_op_when_pump_already_off() {
    let mut status = EquipmentStatus::default();
    assert!(!status.apply_pump_auto_off(Utc::now()));
}
