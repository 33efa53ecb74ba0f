// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd start --target <f>` / `hottubd stop` — C8 `start`/`stop`.

use hottub_engine::controller::Controller;
use hottub_engine::cron_service::CronService;
use hottub_engine::equipment::EquipmentTracker;

use crate::exit_error::ExitError;
use crate::wiring::Deps;

pub async fn start(deps: &Deps, target_temp_f: f64) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let tracker = EquipmentTracker::new(deps.equipment_store.clone(), deps.event_log.clone(), deps.sensors.clone(), deps.clock.clone());
    let controller = Controller::new(deps.target_store.clone(), &tracker, deps.sensors.clone(), &deps.webhook, &cron, deps.clock.clone());

    let decision = controller.start(target_temp_f).await?;
    println!("started: {decision:?}");
    Ok(())
}

pub async fn stop(deps: &Deps) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let tracker = EquipmentTracker::new(deps.equipment_store.clone(), deps.event_log.clone(), deps.sensors.clone(), deps.clock.clone());
    let controller = Controller::new(deps.target_store.clone(), &tracker, deps.sensors.clone(), &deps.webhook, &cron, deps.clock.clone());

    controller.stop().await?;
    println!("stopped");
    Ok(())
}
