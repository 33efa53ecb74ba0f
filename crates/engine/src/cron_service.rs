// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C6: translates wall-clock targets into task-table entries in the host
//! OS's timezone, leaving every other adapter ignorant of cron formatting.

use chrono::{DateTime, Utc};
use hottub_core::{cron_fields_at, host_timezone, next_daily_occurrence, parse_daily_time, CronFields, Marker};
use hottub_adapters::TaskTableAdapter;

use crate::error::EngineError;

pub struct CronService<'a> {
    task_table: &'a dyn TaskTableAdapter,
}

impl<'a> CronService<'a> {
    pub fn new(task_table: &'a dyn TaskTableAdapter) -> Self {
        Self { task_table }
    }

    /// Pure: the cron expression for an absolute instant, no mutation.
    pub fn cron_expression(&self, at: DateTime<Utc>, use_utc: bool) -> String {
        let tz = if use_utc { chrono_tz::UTC } else { host_timezone() };
        cron_fields_at(at, tz).render()
    }

    /// Install a one-off entry for `at`, in host-OS timezone.
    pub async fn schedule_at(&self, at: DateTime<Utc>, command: &str, marker: &Marker) -> Result<String, EngineError> {
        let fields = cron_fields_at(at, host_timezone());
        let line = format!("{} {} {}", fields.render(), command, marker.render());
        self.task_table.add_entry(&line).await?;
        Ok(fields.render())
    }

    /// Install a daily entry from an `HH:MM` or `HH:MM±HH:MM` spec. An
    /// explicit offset is converted into host-OS local time; a bare
    /// `HH:MM` is assumed to already be host-OS local (back-compat).
    pub async fn schedule_daily(&self, time_spec: &str, command: &str, marker: &Marker) -> Result<String, EngineError> {
        let (hour, minute, offset_minutes) = parse_daily_time(time_spec)?;
        let tz = host_timezone();

        let (local_hour, local_minute) = match offset_minutes {
            None => (hour, minute),
            Some(offset) => {
                // Re-anchor the HH:MM-with-offset spec to an absolute
                // instant today, then read back the host-local time.
                let now = Utc::now();
                let naive_today = now.date_naive().and_hms_opt(hour, minute, 0).unwrap_or_else(|| now.naive_utc().into());
                let source_utc = naive_today - chrono::Duration::minutes(offset as i64);
                let source_utc = DateTime::<Utc>::from_naive_utc_and_offset(source_utc, Utc);
                let local = source_utc.with_timezone(&tz);
                (local.format("%H").to_string().parse().unwrap_or(hour), local.format("%M").to_string().parse().unwrap_or(minute))
            }
        };

        let rendered = CronFields::daily(local_hour, local_minute);
        let line = format!("{rendered} {command} {}", marker.render());
        self.task_table.add_entry(&line).await?;
        Ok(rendered)
    }

    /// Install a daily entry at the host-local wall-clock time that `at`
    /// falls on. Used when a caller already has an absolute instant (e.g.
    /// the scheduler booking a recurring job) rather than a `HH:MM` spec.
    pub async fn schedule_daily_at(&self, at: DateTime<Utc>, command: &str, marker: &Marker) -> Result<String, EngineError> {
        let fields = cron_fields_at(at, host_timezone());
        let rendered = CronFields::daily(fields.hour, fields.minute);
        let line = format!("{rendered} {command} {}", marker.render());
        self.task_table.add_entry(&line).await?;
        Ok(rendered)
    }

    /// Convenience used by the planner: the next UTC instant `hour:minute`
    /// occurs in host-OS local time.
    pub fn next_daily_instant(&self, now: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
        next_daily_occurrence(now, host_timezone(), hour, minute)
    }

    pub async fn remove_by_pattern(&self, pattern: &str) -> Result<(), EngineError> {
        self.task_table.remove_by_pattern(pattern).await.map_err(EngineError::from)
    }

    pub async fn list_entries(&self) -> Result<Vec<String>, EngineError> {
        self.task_table.list_entries().await.map_err(EngineError::from)
    }
}

#[cfg(test)]
#[path = "cron_service_tests.rs"]
mod tests;
