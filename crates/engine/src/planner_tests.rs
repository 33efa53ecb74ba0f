// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hottub_adapters::healthcheck::fake::FakeHealthCheckMonitor;
use hottub_adapters::task_table::fake::FakeTaskTable;
use hottub_adapters::webhook::fake::FakeWebhookClient;
use hottub_core::{FakeClock, HeatingCharacteristics};
use hottub_storage::{EquipmentEventLogWriter, EquipmentStatusStore, JobRecordStore};
use crate::equipment::EquipmentTracker;
use std::path::Path;

fn write_sensor_reading(dir: &Path, water_f: f64, ambient_f: Option<f64>) {
    let body = serde_json::json!({
        "timestamp": "2026-01-01T00:00:00Z",
        "received_at": "2026-01-01T00:00:00Z",
        "water_temp_c": (water_f - 32.0) * 5.0 / 9.0,
        "water_temp_f": water_f,
        "ambient_temp_c": ambient_f.map(|f| (f - 32.0) * 5.0 / 9.0),
        "ambient_temp_f": ambient_f,
        "sensors": [],
    });
    std::fs::write(dir.join("esp32-temperature.json"), body.to_string()).unwrap();
}

#[tokio::test]
async fn create_ready_by_schedule_fails_without_a_fitted_velocity() {
    let dir = tempfile::tempdir().unwrap();
    let table = FakeTaskTable::default();
    let webhook = FakeWebhookClient::default();
    let healthcheck = FakeHealthCheckMonitor::default();
    let records = JobRecordStore::new(dir.path());
    let clock = FakeClock::new();

    let cron = CronService::new(&table);
    let scheduler = JobScheduler::new(&records, &cron, &healthcheck, clock.clone(), 3600);
    let tracker = EquipmentTracker::new(
        EquipmentStatusStore::new(dir.path()),
        EquipmentEventLogWriter::new(dir.path()),
        SensorCache::new(dir.path()),
        clock.clone(),
    );
    let controller = Controller::new(
        hottub_storage::TargetStateStore::new(dir.path()),
        &tracker,
        SensorCache::new(dir.path()),
        &webhook,
        &cron,
        clock.clone(),
    );
    let planner = Planner::new(CharacteristicsStore::new(dir.path()), SensorCache::new(dir.path()), &scheduler, &cron, &controller, clock);

    let result = planner.create_ready_by_schedule("7:00", 100.0, "http://host").await;
    assert!(matches!(result, Err(EngineError::MissingCharacteristics(_))));
}

#[tokio::test]
async fn create_ready_by_schedule_installs_a_recurring_wake_up_job() {
    let dir = tempfile::tempdir().unwrap();
    let table = FakeTaskTable::default();
    let webhook = FakeWebhookClient::default();
    let healthcheck = FakeHealthCheckMonitor::default();
    let records = JobRecordStore::new(dir.path());
    let clock = FakeClock::new();

    CharacteristicsStore::new(dir.path())
        .put(&HeatingCharacteristics {
            heating_velocity_f_per_min: Some(0.5),
            startup_lag_minutes: Some(2.0),
            overshoot_degrees_f: Some(1.0),
            ..Default::default()
        })
        .unwrap();

    let cron = CronService::new(&table);
    let scheduler = JobScheduler::new(&records, &cron, &healthcheck, clock.clone(), 3600);
    let tracker = EquipmentTracker::new(
        EquipmentStatusStore::new(dir.path()),
        EquipmentEventLogWriter::new(dir.path()),
        SensorCache::new(dir.path()),
        clock.clone(),
    );
    let controller = Controller::new(
        hottub_storage::TargetStateStore::new(dir.path()),
        &tracker,
        SensorCache::new(dir.path()),
        &webhook,
        &cron,
        clock.clone(),
    );
    let planner = Planner::new(CharacteristicsStore::new(dir.path()), SensorCache::new(dir.path()), &scheduler, &cron, &controller, clock);

    let record = planner.create_ready_by_schedule("7:00", 100.0, "http://host").await.unwrap();
    assert!(record.recurring);
    assert_eq!(record.params.get("ready_by_time").map(String::as_str), Some("7:00"));
    let entries = cron.list_entries().await.unwrap();
    assert!(entries.iter().any(|l| l.contains("WAKE-UP")));
}

#[tokio::test]
async fn handle_wake_up_reports_already_at_target() {
    let dir = tempfile::tempdir().unwrap();
    write_sensor_reading(dir.path(), 102.0, Some(70.0));
    let table = FakeTaskTable::default();
    let webhook = FakeWebhookClient::default();
    let healthcheck = FakeHealthCheckMonitor::default();
    let records = JobRecordStore::new(dir.path());
    let clock = FakeClock::new();

    let cron = CronService::new(&table);
    let scheduler = JobScheduler::new(&records, &cron, &healthcheck, clock.clone(), 3600);
    let tracker = EquipmentTracker::new(
        EquipmentStatusStore::new(dir.path()),
        EquipmentEventLogWriter::new(dir.path()),
        SensorCache::new(dir.path()),
        clock.clone(),
    );
    let controller = Controller::new(
        hottub_storage::TargetStateStore::new(dir.path()),
        &tracker,
        SensorCache::new(dir.path()),
        &webhook,
        &cron,
        clock.clone(),
    );
    let planner = Planner::new(CharacteristicsStore::new(dir.path()), SensorCache::new(dir.path()), &scheduler, &cron, &controller, clock);

    let outcome = planner.handle_wake_up("7:00", 100.0).await.unwrap();
    assert_eq!(outcome, WakeUpOutcome::AlreadyAtTarget);
}

#[tokio::test]
async fn handle_wake_up_starts_immediately_without_fitted_characteristics() {
    let dir = tempfile::tempdir().unwrap();
    write_sensor_reading(dir.path(), 90.0, Some(70.0));
    let table = FakeTaskTable::default();
    let webhook = FakeWebhookClient::default();
    let healthcheck = FakeHealthCheckMonitor::default();
    let records = JobRecordStore::new(dir.path());
    let clock = FakeClock::new();

    let cron = CronService::new(&table);
    let scheduler = JobScheduler::new(&records, &cron, &healthcheck, clock.clone(), 3600);
    let tracker = EquipmentTracker::new(
        EquipmentStatusStore::new(dir.path()),
        EquipmentEventLogWriter::new(dir.path()),
        SensorCache::new(dir.path()),
        clock.clone(),
    );
    let controller = Controller::new(
        hottub_storage::TargetStateStore::new(dir.path()),
        &tracker,
        SensorCache::new(dir.path()),
        &webhook,
        &cron,
        clock.clone(),
    );
    let planner = Planner::new(CharacteristicsStore::new(dir.path()), SensorCache::new(dir.path()), &scheduler, &cron, &controller, clock);

    let outcome = planner.handle_wake_up("7:00", 100.0).await.unwrap();
    assert_eq!(outcome, WakeUpOutcome::StartedImmediately);
    assert!(tracker.get_status().unwrap().heater.on);
}

#[tokio::test]
async fn handle_wake_up_reports_stays_warm_when_ambient_keeps_it_hot() {
    let dir = tempfile::tempdir().unwrap();
    write_sensor_reading(dir.path(), 99.0, Some(150.0));
    let table = FakeTaskTable::default();
    let webhook = FakeWebhookClient::default();
    let healthcheck = FakeHealthCheckMonitor::default();
    let records = JobRecordStore::new(dir.path());
    let clock = FakeClock::new();

    CharacteristicsStore::new(dir.path())
        .put(&HeatingCharacteristics { heating_velocity_f_per_min: Some(0.5), cooling_coefficient_k: Some(0.0001), ..Default::default() })
        .unwrap();

    let cron = CronService::new(&table);
    let scheduler = JobScheduler::new(&records, &cron, &healthcheck, clock.clone(), 3600);
    let tracker = EquipmentTracker::new(
        EquipmentStatusStore::new(dir.path()),
        EquipmentEventLogWriter::new(dir.path()),
        SensorCache::new(dir.path()),
        clock.clone(),
    );
    let controller = Controller::new(
        hottub_storage::TargetStateStore::new(dir.path()),
        &tracker,
        SensorCache::new(dir.path()),
        &webhook,
        &cron,
        clock.clone(),
    );
    let planner = Planner::new(CharacteristicsStore::new(dir.path()), SensorCache::new(dir.path()), &scheduler, &cron, &controller, clock);

    let outcome = planner.handle_wake_up("23:59+00:00", 100.0).await.unwrap();
    assert_eq!(outcome, WakeUpOutcome::StaysWarm);
}
