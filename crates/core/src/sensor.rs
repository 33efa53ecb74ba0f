// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shape of the sensor cache (§6 `getLatest()`), written by the
//! (out-of-scope) sensor-ingest endpoint and read by the controller and
//! estimator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_offset: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub address: String,
    pub temp_c: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
    pub water_temp_c: f64,
    pub water_temp_f: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temp_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temp_f: Option<f64>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Apply a sensor's calibration offset (in Celsius) and return the
/// calibrated Fahrenheit reading.
pub fn calibrated_fahrenheit(raw_celsius: f64, calibration_offset_c: Option<f64>) -> f64 {
    celsius_to_fahrenheit(raw_celsius + calibration_offset_c.unwrap_or(0.0))
}

/// Polling interval the sensor device should use on its next report,
/// purely a function of whether the heater is currently on (§6
/// `getInterval()`).
pub fn poll_interval_seconds(heater_on: bool, on_interval_s: u64, off_interval_s: u64) -> u64 {
    if heater_on {
        on_interval_s
    } else {
        off_interval_s
    }
}

#[cfg(test)]
#[path = "sensor_tests.rs"]
mod tests;
