// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `HOTTUB:<jobId>:<LABEL>:<SCOPE>` task-table ownership marker.
//!
//! This comment is what distinguishes entries we own from foreign lines in
//! the host's task table. Every mutating task-table operation must key off
//! this grammar and leave anything else untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Once,
    Daily,
}

impl Scope {
    fn as_str(self) -> &'static str {
        match self {
            Scope::Once => "ONCE",
            Scope::Daily => "DAILY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub job_id: String,
    pub label: String,
    pub scope: Scope,
}

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"HOTTUB:([A-Za-z0-9_-]+):([A-Z-]+):(ONCE|DAILY)").expect("static marker regex is valid")
});

impl Marker {
    pub fn new(job_id: impl Into<String>, label: impl Into<String>, scope: Scope) -> Self {
        Self { job_id: job_id.into(), label: label.into(), scope }
    }

    /// Render the trailing comment, e.g. `# HOTTUB:job-abc12345:HEAT-ON:ONCE`.
    pub fn render(&self) -> String {
        format!("# HOTTUB:{}:{}:{}", self.job_id, self.label, self.scope.as_str())
    }

    /// Parse a marker out of an arbitrary task-table line. Returns `None` if
    /// the line carries no `HOTTUB:` marker at all (a foreign entry).
    pub fn find_in(line: &str) -> Option<Marker> {
        let caps = MARKER_RE.captures(line)?;
        let scope = match &caps[3] {
            "ONCE" => Scope::Once,
            "DAILY" => Scope::Daily,
            _ => return None,
        };
        Some(Marker::new(caps[1].to_string(), caps[2].to_string(), scope))
    }

    pub fn is_hottub_line(line: &str) -> bool {
        line.contains("HOTTUB:")
    }
}

/// Parse `"HH:MM"` or `"HH:MM±HH:MM"` into `(hour, minute, utc_offset_minutes)`.
pub fn parse_daily_time(spec: &str) -> Result<(u32, u32, Option<i32>), CoreError> {
    static DAILY_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?:([+-])(\d{1,2}):(\d{2}))?$").expect("static daily-time regex is valid"));

    let caps = DAILY_RE
        .captures(spec)
        .ok_or_else(|| CoreError::InvalidDailyTime(spec.to_string()))?;

    let hour: u32 = caps[1].parse().map_err(|_| CoreError::InvalidDailyTime(spec.to_string()))?;
    let minute: u32 = caps[2].parse().map_err(|_| CoreError::InvalidDailyTime(spec.to_string()))?;
    if hour > 23 || minute > 59 {
        return Err(CoreError::InvalidDailyTime(spec.to_string()));
    }

    let offset = if let Some(sign) = caps.get(3) {
        let oh: i32 = caps[4].parse().map_err(|_| CoreError::InvalidDailyTime(spec.to_string()))?;
        let om: i32 = caps[5].parse().map_err(|_| CoreError::InvalidDailyTime(spec.to_string()))?;
        let magnitude = oh * 60 + om;
        Some(if sign.as_str() == "-" { -magnitude } else { magnitude })
    } else {
        None
    };

    Ok((hour, minute, offset))
}

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;
