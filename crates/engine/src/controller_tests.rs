// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hottub_adapters::task_table::fake::FakeTaskTable;
use hottub_adapters::webhook::fake::FakeWebhookClient;
use hottub_core::FakeClock;
use hottub_storage::{EquipmentEventLogWriter, EquipmentStatusStore};
use std::path::Path;

fn write_sensor_reading(dir: &Path, water_temp_f: f64) {
    let path = dir.join("esp32-temperature.json");
    let body = serde_json::json!({
        "timestamp": "2026-01-01T00:00:00Z",
        "received_at": "2026-01-01T00:00:00Z",
        "water_temp_c": (water_temp_f - 32.0) * 5.0 / 9.0,
        "water_temp_f": water_temp_f,
        "sensors": [],
    });
    std::fs::write(path, body.to_string()).unwrap();
}

struct Fixture {
    dir: tempfile::TempDir,
    clock: FakeClock,
    table: FakeTaskTable,
    webhook: FakeWebhookClient,
}

impl Fixture {
    fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap(), clock: FakeClock::new(), table: FakeTaskTable::default(), webhook: FakeWebhookClient::default() }
    }

    fn controller(&self) -> (EquipmentTracker<FakeClock>, CronService<'_>) {
        let tracker = EquipmentTracker::new(
            EquipmentStatusStore::new(self.dir.path()),
            EquipmentEventLogWriter::new(self.dir.path()),
            SensorCache::new(self.dir.path()),
            self.clock.clone(),
        );
        let cron = CronService::new(&self.table);
        (tracker, cron)
    }
}

#[tokio::test]
async fn check_and_adjust_is_inactive_without_a_started_target() {
    let fx = Fixture::new();
    let (tracker, cron) = fx.controller();
    let controller = Controller::new(
        TargetStateStore::new(fx.dir.path()),
        &tracker,
        SensorCache::new(fx.dir.path()),
        &fx.webhook,
        &cron,
        fx.clock.clone(),
    );
    assert_eq!(controller.check_and_adjust().await.unwrap(), ControlDecision::Inactive);
}

#[tokio::test]
async fn start_below_target_turns_on_heater_and_schedules_a_wake_up() {
    let fx = Fixture::new();
    write_sensor_reading(fx.dir.path(), 95.0);
    let (tracker, cron) = fx.controller();
    let controller = Controller::new(
        TargetStateStore::new(fx.dir.path()),
        &tracker,
        SensorCache::new(fx.dir.path()),
        &fx.webhook,
        &cron,
        fx.clock.clone(),
    );

    let decision = controller.start(100.0).await.unwrap();
    assert_eq!(decision, ControlDecision::Heating { cron_scheduled: true });
    assert_eq!(fx.webhook.fired.lock().unwrap().as_slice(), &["hot-tub-heat-on"]);
    assert!(tracker.get_status().unwrap().heater.on);

    let entries = cron.list_entries().await.unwrap();
    assert!(entries.iter().any(|l| l.contains("HEAT-TARGET")));
}

#[tokio::test]
async fn start_at_or_above_target_turns_heater_off_immediately() {
    let fx = Fixture::new();
    write_sensor_reading(fx.dir.path(), 102.0);
    let (tracker, cron) = fx.controller();
    tracker.set_heater(true).unwrap();
    let controller = Controller::new(
        TargetStateStore::new(fx.dir.path()),
        &tracker,
        SensorCache::new(fx.dir.path()),
        &fx.webhook,
        &cron,
        fx.clock.clone(),
    );

    let decision = controller.start(100.0).await.unwrap();
    assert_eq!(decision, ControlDecision::TargetReached { heater_turned_off: true });
    assert!(fx.webhook.fired.lock().unwrap().contains(&"hot-tub-heat-off".to_string()));
    assert!(!tracker.get_status().unwrap().heater.on);
    assert!(!TargetStateStore::new(fx.dir.path()).get().unwrap().active);
}

#[tokio::test]
async fn stop_turns_off_a_running_heater_and_clears_state() {
    let fx = Fixture::new();
    let (tracker, cron) = fx.controller();
    tracker.set_heater(true).unwrap();
    TargetStateStore::new(fx.dir.path()).put(&HeatingTargetState::start(100.0, Utc::now()).unwrap()).unwrap();
    cron.schedule_at(Utc::now() + chrono::Duration::minutes(1), TICK_COMMAND, &Controller::<FakeClock>::controller_marker()).await.unwrap();

    let controller = Controller::new(
        TargetStateStore::new(fx.dir.path()),
        &tracker,
        SensorCache::new(fx.dir.path()),
        &fx.webhook,
        &cron,
        fx.clock.clone(),
    );
    controller.stop().await.unwrap();

    assert!(!tracker.get_status().unwrap().heater.on);
    assert!(!TargetStateStore::new(fx.dir.path()).get().unwrap().active);
    assert!(cron.list_entries().await.unwrap().is_empty());
}

#[test]
fn next_wake_up_lands_on_a_minute_boundary_with_safety_margin() {
    assert_eq!(compute_next_wake_up_epoch_s(0), 60);
    assert_eq!(compute_next_wake_up_epoch_s(60), 120);
    assert_eq!(compute_next_wake_up_epoch_s(56), 120);
    assert_eq!(compute_next_wake_up_epoch_s(65), 120);
    for now in 0u64..180 {
        let next = compute_next_wake_up_epoch_s(now);
        assert_eq!(next % 60, 0);
        assert!(next > now);
        assert!(next - now >= 5);
    }
}
