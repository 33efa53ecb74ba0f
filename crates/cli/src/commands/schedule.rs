// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd schedule`, `hottubd cancel`, `hottubd list` — C7 `scheduleJob` /
//! `cancelJob` / `listJobs`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hottub_core::{normalize_api_base_url, JobAction, JobId};
use hottub_engine::cron_service::CronService;
use hottub_engine::scheduler::JobScheduler;

use crate::exit_error::ExitError;
use crate::output::{handle_list, OutputFormat};
use crate::wiring::Deps;

/// Parse the kebab-case action name the CLI accepts, matching
/// [`hottub_core::JobAction`]'s own `Display` rendering.
pub fn parse_action(s: &str) -> Result<JobAction, ExitError> {
    match s {
        "heat-on" => Ok(JobAction::HeatOn),
        "heat-off" => Ok(JobAction::HeatOff),
        "pump-on" => Ok(JobAction::PumpOn),
        "pump-off" => Ok(JobAction::PumpOff),
        "start-heating" => Ok(JobAction::StartHeating),
        "wake-up" => Ok(JobAction::WakeUp),
        other => Err(ExitError::new(2, format!("unknown job action {other:?}"))),
    }
}

/// Shells out to the action's HTTP endpoint; this is the command installed
/// in the task table for every non-controller-owned job.
fn curl_command(api_base_url: &str, action: JobAction) -> String {
    let base = normalize_api_base_url(api_base_url);
    format!("curl -fsS -X POST '{}{}'", base, action.endpoint())
}

pub async fn schedule(
    deps: &Deps,
    action: &str,
    at: &str,
    recurring: bool,
    params: Vec<(String, String)>,
) -> Result<(), ExitError> {
    let action = parse_action(action)?;
    let at: DateTime<Utc> = at.parse().map_err(|_| ExitError::new(2, format!("invalid --at timestamp {at:?}, expected RFC 3339")))?;
    let params: BTreeMap<String, String> = params.into_iter().collect();

    let cron = CronService::new(&deps.task_table);
    let scheduler = JobScheduler::new(&deps.records, &cron, &deps.healthcheck, deps.clock.clone(), deps.healthcheck_grace_seconds());

    let command = curl_command(&deps.config.webhook_base_url, action);
    let record = scheduler.schedule_job(action, &deps.config.webhook_base_url, at, recurring, params, &command).await?;
    println!("scheduled {} ({})", record.job_id, record.action);
    Ok(())
}

pub async fn cancel(deps: &Deps, job_id: &str) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let scheduler = JobScheduler::new(&deps.records, &cron, &deps.healthcheck, deps.clock.clone(), deps.healthcheck_grace_seconds());
    scheduler.cancel_job(&JobId::from_string(job_id)).await?;
    println!("cancelled {job_id}");
    Ok(())
}

pub async fn list(deps: &Deps, format: OutputFormat) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let scheduler = JobScheduler::new(&deps.records, &cron, &deps.healthcheck, deps.clock.clone(), deps.healthcheck_grace_seconds());
    let jobs = scheduler.list_jobs().await?;

    handle_list(format, &jobs, "No scheduled jobs", |jobs| {
        println!("{:<24} {:<14} {:<8} SCHEDULED", "JOB ID", "ACTION", "RECURRING");
        for job in jobs {
            println!("{:<24} {:<14} {:<8} {}", job.job_id, job.action, job.recurring, job.scheduled_time.to_rfc3339());
        }
    })
    .map_err(|e| ExitError::new(1, e.to_string()))
}
