// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn celsius_conversion_matches_known_points() {
    assert!((celsius_to_fahrenheit(0.0) - 32.0).abs() < 1e-9);
    assert!((celsius_to_fahrenheit(100.0) - 212.0).abs() < 1e-9);
}

#[test]
fn calibration_offset_shifts_before_conversion() {
    let calibrated = calibrated_fahrenheit(37.0, Some(1.0));
    let uncalibrated = celsius_to_fahrenheit(38.0);
    assert!((calibrated - uncalibrated).abs() < 1e-9);
}

#[test]
fn missing_calibration_offset_is_a_no_op() {
    assert_eq!(calibrated_fahrenheit(37.0, None), celsius_to_fahrenheit(37.0));
}

#[test]
fn poll_interval_follows_heater_state() {
    assert_eq!(poll_interval_seconds(true, 60, 300), 60);
    assert_eq!(poll_interval_seconds(false, 60, 300), 300);
}
