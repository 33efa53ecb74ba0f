// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fitted thermal model the estimator produces and the planner
//! consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HeatingCharacteristics {
    pub heating_velocity_f_per_min: Option<f64>,
    pub startup_lag_minutes: Option<f64>,
    pub overshoot_degrees_f: Option<f64>,
    pub cooling_coefficient_k: Option<f64>,
    pub cooling_r_squared: Option<f64>,
    pub cooling_data_points: usize,
    pub sessions_analyzed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// §4.6: the cold-start worst case assumed when no prior reading exists.
pub const COLD_FLOOR_F: f64 = 58.0;
/// §4.6: padding added on top of the raw heat-time estimate.
pub const SAFETY_MARGIN_MINUTES: f64 = 15.0;

impl HeatingCharacteristics {
    /// Upper bound on how long heating from `COLD_FLOOR_F` to `target` could
    /// take, used to pick the daily wake-up time far enough ahead of a
    /// ready-by deadline. `None` if the velocity hasn't been fitted yet.
    pub fn max_heat_minutes(&self, target_temp_f: f64) -> Option<f64> {
        let velocity = self.heating_velocity_f_per_min?;
        if velocity <= 0.0 {
            return None;
        }
        let lag = self.startup_lag_minutes.unwrap_or(0.0);
        Some((target_temp_f - COLD_FLOOR_F) / velocity + lag + SAFETY_MARGIN_MINUTES)
    }
}

#[cfg(test)]
#[path = "characteristics_tests.rs"]
mod tests;
