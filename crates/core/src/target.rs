// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heating-target state: the singleton the controller owns.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Controller hard limit (§6 Settings ranges).
pub const MIN_TARGET_F: f64 = 80.0;
pub const MAX_TARGET_F: f64 = 110.0;

/// Looser gate used when booking a schedule entry, before the controller
/// ever sees the value.
pub const SCHEDULE_MIN_TARGET_F: f64 = 50.0;
pub const SCHEDULE_MAX_TARGET_F: f64 = 110.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatingTargetState {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for HeatingTargetState {
    fn default() -> Self {
        Self { active: false, target_temp_f: None, started_at: None }
    }
}

impl HeatingTargetState {
    pub fn start(target_temp_f: f64, started_at: chrono::DateTime<chrono::Utc>) -> Result<Self, CoreError> {
        if !(MIN_TARGET_F..=MAX_TARGET_F).contains(&target_temp_f) {
            return Err(CoreError::TargetOutOfRange(target_temp_f));
        }
        Ok(Self { active: true, target_temp_f: Some(target_temp_f), started_at: Some(started_at) })
    }

    pub fn stopped() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
