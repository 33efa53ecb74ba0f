// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Row shapes for the two append-only logs: per-reading temperature
//! samples and equipment on/off events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureLogRow {
    pub timestamp: DateTime<Utc>,
    pub water_temp_f: f64,
    pub water_temp_c: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temp_f: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambient_temp_c: Option<f64>,
    pub heater_on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Equipment {
    #[serde(rename = "heater")]
    Heater,
    #[serde(rename = "pump")]
    Pump,
}

crate::simple_display! {
    Equipment {
        Heater => "heater",
        Pump => "pump",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayAction {
    #[serde(rename = "on")]
    On,
    #[serde(rename = "off")]
    Off,
}

crate::simple_display! {
    RelayAction {
        On => "on",
        Off => "off",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentEventRow {
    pub timestamp: DateTime<Utc>,
    pub equipment: Equipment,
    pub action: RelayAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_temp_f: Option<f64>,
}
