// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hottub_adapters::healthcheck::fake::FakeHealthCheckMonitor;
use hottub_adapters::task_table::fake::FakeTaskTable;
use hottub_core::FakeClock;

fn make_scheduler<'a>(
    records: &'a JobRecordStore,
    cron: &'a CronService<'a>,
    healthcheck: &'a dyn HealthCheckMonitor,
) -> JobScheduler<'a, FakeClock> {
    JobScheduler::new(records, cron, healthcheck, FakeClock::new(), 3600)
}

#[tokio::test]
async fn schedule_job_writes_a_record_and_a_task_table_entry() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::default();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    let record = scheduler
        .schedule_job(JobAction::HeatOn, "http://host/", Utc::now() + chrono::Duration::hours(1), false, BTreeMap::new(), "/usr/bin/hottubd tick")
        .await
        .unwrap();

    assert_eq!(record.api_base_url, "http://host");
    assert!(records.get(&record.job_id).unwrap().is_some());
    let lines = cron.list_entries().await.unwrap();
    assert!(lines.iter().any(|l| l.contains(record.job_id.as_str())));
}

#[tokio::test]
async fn schedule_job_rejects_past_one_off_times() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::default();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    let result = scheduler
        .schedule_job(JobAction::HeatOn, "http://host", Utc::now() - chrono::Duration::hours(1), false, BTreeMap::new(), "cmd")
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn schedule_job_attaches_a_health_check_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::enabled();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    let record = scheduler
        .schedule_job(JobAction::PumpOn, "http://host", Utc::now() + chrono::Duration::hours(1), false, BTreeMap::new(), "cmd")
        .await
        .unwrap();

    assert!(record.healthcheck_uuid.is_some());
    assert_eq!(healthcheck.pings.lock().len(), 1);
}

#[tokio::test]
async fn cancel_job_removes_record_and_task_table_entry() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::default();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    let record = scheduler
        .schedule_job(JobAction::HeatOff, "http://host", Utc::now() + chrono::Duration::hours(1), false, BTreeMap::new(), "cmd")
        .await
        .unwrap();

    scheduler.cancel_job(&record.job_id).await.unwrap();
    assert!(records.get(&record.job_id).unwrap().is_none());
    let lines = cron.list_entries().await.unwrap();
    assert!(!lines.iter().any(|l| l.contains(record.job_id.as_str())));
}

#[tokio::test]
async fn list_jobs_reconciles_orphaned_task_table_entries() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    table.seed(["0 3 * * * cmd # HOTTUB:job-orphan12:HEAT-ON:ONCE"]);
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::default();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    let jobs = scheduler.list_jobs().await.unwrap();
    assert!(jobs.is_empty());
    let lines = cron.list_entries().await.unwrap();
    assert!(lines.is_empty(), "orphaned entry should have been removed");
}

#[tokio::test]
async fn list_jobs_exempts_controller_owned_entries_from_reconciliation() {
    let dir = tempfile::tempdir().unwrap();
    let records = JobRecordStore::new(dir.path());
    let table = FakeTaskTable::default();
    table.seed(["0 3 * * * cmd # HOTTUB:heat-target-deadbeef:HEAT-TARGET:ONCE"]);
    let cron = CronService::new(&table);
    let healthcheck = FakeHealthCheckMonitor::default();
    let scheduler = make_scheduler(&records, &cron, &healthcheck);

    scheduler.list_jobs().await.unwrap();
    let lines = cron.list_entries().await.unwrap();
    assert_eq!(lines.len(), 1, "controller-owned entries must survive reconciliation");
}
