// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd plan-ready-by` / `hottubd wake-up` — C10 `createReadyBySchedule` /
//! `handleWakeUp`.

use hottub_engine::controller::Controller;
use hottub_engine::cron_service::CronService;
use hottub_engine::equipment::EquipmentTracker;
use hottub_engine::planner::Planner;

use crate::exit_error::ExitError;
use crate::wiring::Deps;

pub async fn plan_ready_by(deps: &Deps, ready_by_time: &str, target_temp_f: f64) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let tracker = EquipmentTracker::new(deps.equipment_store.clone(), deps.event_log.clone(), deps.sensors.clone(), deps.clock.clone());
    let controller = Controller::new(deps.target_store.clone(), &tracker, deps.sensors.clone(), &deps.webhook, &cron, deps.clock.clone());
    let scheduler = hottub_engine::scheduler::JobScheduler::new(&deps.records, &cron, &deps.healthcheck, deps.clock.clone(), deps.healthcheck_grace_seconds());
    let planner = Planner::new(deps.characteristics.clone(), deps.sensors.clone(), &scheduler, &cron, &controller, deps.clock.clone());

    let record = planner.create_ready_by_schedule(ready_by_time, target_temp_f, &deps.config.webhook_base_url).await?;
    println!("wake-up job installed: {} (ready by {ready_by_time})", record.job_id);
    Ok(())
}

pub async fn wake_up(deps: &Deps, ready_by_time: &str, target_temp_f: f64) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let tracker = EquipmentTracker::new(deps.equipment_store.clone(), deps.event_log.clone(), deps.sensors.clone(), deps.clock.clone());
    let controller = Controller::new(deps.target_store.clone(), &tracker, deps.sensors.clone(), &deps.webhook, &cron, deps.clock.clone());
    let scheduler = hottub_engine::scheduler::JobScheduler::new(&deps.records, &cron, &deps.healthcheck, deps.clock.clone(), deps.healthcheck_grace_seconds());
    let planner = Planner::new(deps.characteristics.clone(), deps.sensors.clone(), &scheduler, &cron, &controller, deps.clock.clone());

    let outcome = planner.handle_wake_up(ready_by_time, target_temp_f).await?;
    println!("{outcome:?}");
    Ok(())
}
