// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records: the persisted shape of a scheduled action.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobAction {
    HeatOn,
    HeatOff,
    PumpOn,
    PumpOff,
    StartHeating,
    WakeUp,
}

crate::simple_display! {
    JobAction {
        HeatOn => "heat-on",
        HeatOff => "heat-off",
        PumpOn => "pump-on",
        PumpOff => "pump-off",
        StartHeating => "start-heating",
        WakeUp => "wake-up",
    }
}

impl JobAction {
    pub fn endpoint(self) -> &'static str {
        match self {
            JobAction::HeatOn => "/equipment/heater/on",
            JobAction::HeatOff => "/equipment/heater/off",
            JobAction::PumpOn => "/equipment/pump/on",
            JobAction::PumpOff => "/equipment/pump/off",
            JobAction::StartHeating => "/controller/start",
            JobAction::WakeUp => "/planner/wake-up",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: JobId,
    pub action: JobAction,
    pub endpoint: String,
    pub api_base_url: String,
    pub recurring: bool,
    pub scheduled_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck_ping_url: Option<String>,
}

/// Strip a single trailing slash, per the §3 "stored without trailing slash"
/// invariant. Does not touch interior slashes.
pub fn normalize_api_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

impl JobRecord {
    pub fn new(
        job_id: JobId,
        action: JobAction,
        api_base_url: impl Into<String>,
        recurring: bool,
        scheduled_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
        params: BTreeMap<String, String>,
    ) -> Self {
        Self {
            job_id,
            action,
            endpoint: action.endpoint().to_string(),
            api_base_url: normalize_api_base_url(&api_base_url.into()),
            recurring,
            scheduled_time,
            created_at,
            params,
            healthcheck_uuid: None,
            healthcheck_ping_url: None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
