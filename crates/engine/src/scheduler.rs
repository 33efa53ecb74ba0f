// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C7: the job scheduler. Persists job records, binds them to task-table
//! entries via [`crate::cron_service::CronService`], and reconciles
//! orphans on every listing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hottub_core::{Clock, JobAction, JobId, JobRecord, Marker, Scope};
use hottub_adapters::HealthCheckMonitor;
use hottub_storage::JobRecordStore;

use crate::cron_service::CronService;
use crate::error::EngineError;

pub struct JobScheduler<'a, C: Clock> {
    records: &'a JobRecordStore,
    cron: &'a CronService<'a>,
    healthcheck: &'a dyn HealthCheckMonitor,
    clock: C,
    healthcheck_grace_seconds: u64,
}

impl<'a, C: Clock> JobScheduler<'a, C> {
    pub fn new(
        records: &'a JobRecordStore,
        cron: &'a CronService<'a>,
        healthcheck: &'a dyn HealthCheckMonitor,
        clock: C,
        healthcheck_grace_seconds: u64,
    ) -> Self {
        Self { records, cron, healthcheck, clock, healthcheck_grace_seconds }
    }

    fn now(&self) -> DateTime<Utc> {
        use chrono::TimeZone;
        Utc.timestamp_millis_opt(self.clock.epoch_ms() as i64).single().unwrap_or_else(Utc::now)
    }

    pub async fn schedule_job(
        &self,
        action: JobAction,
        api_base_url: &str,
        at: DateTime<Utc>,
        recurring: bool,
        params: BTreeMap<String, String>,
        command: &str,
    ) -> Result<JobRecord, EngineError> {
        if !recurring && at <= self.now() {
            return Err(EngineError::Core(hottub_core::CoreError::ScheduledTimeInPast));
        }

        let job_id = if recurring { JobId::recurring() } else { JobId::one_off() };
        let mut record = JobRecord::new(job_id, action, api_base_url, recurring, at, self.now(), params);

        let scope = if recurring { Scope::Daily } else { Scope::Once };
        let label = action.to_string().to_uppercase();
        let marker = Marker::new(job_id.to_string(), label.clone(), scope);

        if recurring {
            self.cron.schedule_daily_at(at, command, &marker).await?;
        } else {
            self.cron.schedule_at(at, command, &marker).await?;
        }

        if self.healthcheck.is_enabled() {
            let cron_expr = self.cron.cron_expression(at, false);
            match self.healthcheck.create_check(job_id.as_str(), &cron_expr, "UTC", self.healthcheck_grace_seconds).await {
                Ok(Some(handle)) => {
                    if let Err(err) = self.healthcheck.ping(&handle.ping_url).await {
                        tracing::warn!(?err, "initial health-check ping failed");
                    }
                    record.healthcheck_uuid = Some(handle.uuid);
                    record.healthcheck_ping_url = Some(handle.ping_url);
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(?err, "failed to create health check; scheduling proceeds without it"),
            }
        }

        self.records.put(&record)?;
        Ok(record)
    }

    /// Reconcile: delete any HOTTUB `job-`/`rec-`-prefixed marker with no
    /// backing record. Controller-owned `heat-target-` entries are exempt
    /// — they have no record file by design.
    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>, EngineError> {
        let mut records = self.records.list()?;
        records.sort_by_key(|r| r.scheduled_time);

        let known: std::collections::HashSet<String> = records.iter().map(|r| r.job_id.to_string()).collect();
        let entries = self.cron.list_entries().await?;
        for line in entries {
            let Some(marker) = hottub_core::Marker::find_in(&line) else { continue };
            let is_controller_owned = marker.job_id.starts_with(JobId::CONTROLLER_PREFIX);
            let is_job_owned = marker.job_id.starts_with(JobId::ONE_OFF_PREFIX) || marker.job_id.starts_with(JobId::RECURRING_PREFIX);
            if is_job_owned && !is_controller_owned && !known.contains(&marker.job_id) {
                tracing::info!(job_id = %marker.job_id, "removing orphaned task-table entry");
                self.cron.remove_by_pattern(&marker.job_id).await?;
            }
        }

        Ok(records)
    }

    pub async fn cancel_job(&self, job_id: &JobId) -> Result<(), EngineError> {
        let record = self.records.get(job_id)?.ok_or(EngineError::JobNotFound(*job_id))?;

        self.cron.remove_by_pattern(job_id.as_str()).await?;
        self.records.delete(job_id)?;

        if let Some(uuid) = &record.healthcheck_uuid {
            if let Err(err) = self.healthcheck.delete(uuid).await {
                tracing::warn!(?err, "failed to delete health check during job cancellation");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
