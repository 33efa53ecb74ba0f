// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C10: the deadline planner (DTDT — "deadline-targeted dynamic timing").
//! Two one-way entry points, never calling back into each other or into
//! the controller inline: [`Planner::create_ready_by_schedule`] installs a
//! recurring wake-up job; [`Planner::handle_wake_up`] is what that job runs
//! when it fires.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use hottub_core::{host_timezone, next_daily_occurrence, parse_daily_time, Clock, JobAction, JobId, JobRecord, Marker, Scope};
use hottub_storage::{CharacteristicsStore, SensorCache};

use crate::controller::Controller;
use crate::cron_service::CronService;
use crate::error::EngineError;
use crate::scheduler::JobScheduler;

pub const WAKE_UP_COMMAND: &str = "/usr/bin/hottubd wake-up";
pub const START_COMMAND_NAME: &str = "/usr/bin/hottubd";

#[derive(Debug, Clone, PartialEq)]
pub enum WakeUpOutcome {
    AlreadyAtTarget,
    StaysWarm,
    StartedImmediately,
    PrecisionScheduled { job_id: JobId, heat_minutes: f64, start_time: DateTime<Utc> },
}

/// Anchor an `HH:MM` (host-OS local) or `HH:MM±HH:MM` (explicit offset) spec
/// to the next absolute instant it occurs, within the next 24h.
fn anchor_daily_instant(now: DateTime<Utc>, hour: u32, minute: u32, offset_minutes: Option<i32>) -> DateTime<Utc> {
    match offset_minutes {
        None => next_daily_occurrence(now, host_timezone(), hour, minute),
        Some(offset) => {
            let today: NaiveDate = now.date_naive();
            let naive = today.and_hms_opt(hour, minute, 0).unwrap_or_else(|| now.naive_utc());
            let source_utc = naive - Duration::minutes(offset as i64);
            let mut instant = DateTime::<Utc>::from_naive_utc_and_offset(source_utc, Utc);
            if instant <= now {
                instant += Duration::days(1);
            }
            instant
        }
    }
}

pub struct Planner<'a, C: Clock> {
    characteristics: CharacteristicsStore,
    sensors: SensorCache,
    scheduler: &'a JobScheduler<'a, C>,
    cron: &'a CronService<'a>,
    controller: &'a Controller<'a, C>,
    clock: C,
}

impl<'a, C: Clock> Planner<'a, C> {
    pub fn new(
        characteristics: CharacteristicsStore,
        sensors: SensorCache,
        scheduler: &'a JobScheduler<'a, C>,
        cron: &'a CronService<'a>,
        controller: &'a Controller<'a, C>,
        clock: C,
    ) -> Self {
        Self { characteristics, sensors, scheduler, cron, controller, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.epoch_ms() as i64).single().unwrap_or_else(Utc::now)
    }

    /// Install a recurring wake-up job that fires `maxHeatMinutes` before
    /// `ready_by_time` every day, in host-OS local time.
    pub async fn create_ready_by_schedule(&self, ready_by_time: &str, target_temp_f: f64, api_base_url: &str) -> Result<JobRecord, EngineError> {
        let characteristics = self.characteristics.get()?;
        let max_heat_minutes =
            characteristics.max_heat_minutes(target_temp_f).ok_or(EngineError::MissingCharacteristics("heating_velocity_f_per_min"))?;

        let (hour, minute, offset) = parse_daily_time(ready_by_time)?;
        let now = self.now();
        let ready_by = anchor_daily_instant(now, hour, minute, offset);
        let wake_up_at = ready_by - Duration::seconds((max_heat_minutes * 60.0).round() as i64);

        let mut params = BTreeMap::new();
        params.insert("ready_by_time".to_string(), ready_by_time.to_string());
        params.insert("target_temp_f".to_string(), target_temp_f.to_string());

        self.scheduler.schedule_job(JobAction::WakeUp, api_base_url, wake_up_at, true, params, WAKE_UP_COMMAND).await
    }

    /// The wake-up job's handler: decide whether the tub needs heating at
    /// all by the deadline, and if so, whether to start now or precision-
    /// schedule a later start.
    pub async fn handle_wake_up(&self, ready_by_time: &str, target_temp_f: f64) -> Result<WakeUpOutcome, EngineError> {
        let reading = self.sensors.get_latest()?.ok_or(EngineError::NoSensorReading)?;
        let water = reading.water_temp_f;
        if water >= target_temp_f {
            return Ok(WakeUpOutcome::AlreadyAtTarget);
        }

        let now = self.now();
        let (hour, minute, offset) = parse_daily_time(ready_by_time)?;
        let ready_by = anchor_daily_instant(now, hour, minute, offset);
        let delta_minutes = (ready_by - now).num_seconds() as f64 / 60.0;

        let characteristics = self.characteristics.get()?;
        let Some(velocity) = characteristics.heating_velocity_f_per_min else {
            // Missing characteristics: the safest behavior is to start now.
            self.controller.start(target_temp_f).await?;
            return Ok(WakeUpOutcome::StartedImmediately);
        };

        let projected = match (characteristics.cooling_coefficient_k, reading.ambient_temp_f) {
            (Some(k), Some(ambient)) => ambient + (water - ambient) * (-k * delta_minutes).exp(),
            _ => water,
        };

        if projected >= target_temp_f {
            return Ok(WakeUpOutcome::StaysWarm);
        }

        let startup_lag = characteristics.startup_lag_minutes.unwrap_or(0.0);
        let heat_minutes = (target_temp_f - projected) / velocity + startup_lag;
        let start_time = ready_by - Duration::seconds((heat_minutes * 60.0).round() as i64);

        if start_time <= now {
            self.controller.start(target_temp_f).await?;
            return Ok(WakeUpOutcome::StartedImmediately);
        }

        let job_id = JobId::controller();
        let marker = Marker::new(job_id.to_string(), "HEAT-TARGET", Scope::Once);
        let command = format!("{START_COMMAND_NAME} start --target {target_temp_f}");
        self.cron.schedule_at(start_time, &command, &marker).await?;

        Ok(WakeUpOutcome::PrecisionScheduled { job_id, heat_minutes, start_time })
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
