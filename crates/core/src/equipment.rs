// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Equipment status: durable heater/pump on-off state plus the pump
//! auto-off policy.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Pump auto-off window. The pump has no remote "are you actually off"
/// signal, so we treat it as off after this much wall-clock time regardless
/// of what we last wrote.
pub const PUMP_AUTO_OFF: Duration = Duration::hours(2);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_at: Option<DateTime<Utc>>,
}

impl Default for Relay {
    fn default() -> Self {
        Self { on: false, last_changed_at: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EquipmentStatus {
    pub heater: Relay,
    pub pump: Relay,
}

impl EquipmentStatus {
    /// Apply the pump auto-off rule. Returns `true` if the in-memory value
    /// changed (the caller is responsible for persisting the change).
    pub fn apply_pump_auto_off(&mut self, now: DateTime<Utc>) -> bool {
        if !self.pump.on {
            return false;
        }
        let Some(changed_at) = self.pump.last_changed_at else {
            return false;
        };
        if now - changed_at > PUMP_AUTO_OFF {
            self.pump.on = false;
            self.pump.last_changed_at = Some(changed_at + PUMP_AUTO_OFF);
            true
        } else {
            false
        }
    }

    pub fn set_heater(&mut self, on: bool, at: DateTime<Utc>) {
        self.heater = Relay { on, last_changed_at: Some(at) };
    }

    pub fn set_pump(&mut self, on: bool, at: DateTime<Utc>) {
        self.pump = Relay { on, last_changed_at: Some(at) };
    }
}

#[cfg(test)]
#[path = "equipment_tests.rs"]
mod tests;
