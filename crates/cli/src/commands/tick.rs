// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hottubd tick` — C8 `checkAndAdjust()`.

use hottub_engine::controller::Controller;
use hottub_engine::cron_service::CronService;
use hottub_engine::equipment::EquipmentTracker;

use crate::exit_error::ExitError;
use crate::wiring::Deps;

pub async fn run(deps: &Deps) -> Result<(), ExitError> {
    let cron = CronService::new(&deps.task_table);
    let tracker = EquipmentTracker::new(deps.equipment_store.clone(), deps.event_log.clone(), deps.sensors.clone(), deps.clock.clone());
    let controller = Controller::new(deps.target_store.clone(), &tracker, deps.sensors.clone(), &deps.webhook, &cron, deps.clock.clone());

    let decision = controller.check_and_adjust().await?;
    println!("{decision:?}");
    Ok(())
}
