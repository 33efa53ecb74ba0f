// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hottub_adapters::task_table::fake::FakeTaskTable;
use hottub_core::Scope;

#[tokio::test]
async fn schedule_at_preserves_foreign_entries() {
    let table = FakeTaskTable::default();
    table.seed(["0 3 * * * /usr/bin/backup.sh"]);
    let service = CronService::new(&table);
    let marker = Marker::new("job-abc12345", "HEAT-TARGET", Scope::Once);
    service.schedule_at(Utc::now() + chrono::Duration::minutes(5), "/usr/bin/hottubd tick", &marker).await.unwrap();
    let lines = service.list_entries().await.unwrap();
    assert!(lines.iter().any(|l| l.contains("backup.sh")));
    assert!(lines.iter().any(|l| l.contains("HOTTUB:job-abc12345")));
}

#[tokio::test]
async fn schedule_daily_without_offset_emits_fields_without_leading_zeros() {
    let table = FakeTaskTable::default();
    let service = CronService::new(&table);
    let marker = Marker::new("rec-deadbeef", "HEAT-TARGET", Scope::Daily);
    let rendered = service.schedule_daily("7:05", "/usr/bin/hottubd wake-up", &marker).await.unwrap();
    assert_eq!(rendered, "5 7 * * *");
}

#[tokio::test]
async fn remove_by_pattern_delegates_to_the_adapter() {
    let table = FakeTaskTable::default();
    table.seed(["0 3 * * * x # HOTTUB:job-1:HEAT-ON:ONCE", "0 4 * * * y # HOTTUB:job-2:HEAT-OFF:ONCE"]);
    let service = CronService::new(&table);
    service.remove_by_pattern("job-1").await.unwrap();
    let lines = service.list_entries().await.unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("job-2"));
}

#[tokio::test]
async fn schedule_daily_at_uses_host_local_wall_clock_time() {
    let table = FakeTaskTable::default();
    let service = CronService::new(&table);
    let marker = Marker::new("rec-cafef00d", "HEAT-TARGET", Scope::Daily);
    let at = Utc::now();
    let rendered = service.schedule_daily_at(at, "/usr/bin/hottubd wake-up", &marker).await.unwrap();
    assert_eq!(rendered.split(' ').count(), 5);
}

#[test]
fn cron_expression_is_pure_and_does_not_mutate() {
    let table = FakeTaskTable::default();
    let service = CronService::new(&table);
    let expr = service.cron_expression(Utc::now(), true);
    assert_eq!(expr.split(' ').count(), 5);
}
