// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C8: the target-temperature controller. One invocation is one tick —
//! read state, decide, actuate, schedule the next tick. "Am I active?"
//! lives entirely in [`HeatingTargetState`], never in process memory.

use chrono::{DateTime, TimeZone, Utc};
use hottub_adapters::webhook::{EVENT_HEAT_OFF, EVENT_HEAT_ON};
use hottub_adapters::WebhookClient;
use hottub_core::{Clock, HeatingTargetState, JobId, Marker, Scope};
use hottub_storage::{SensorCache, TargetStateStore};

use crate::cron_service::CronService;
use crate::equipment::EquipmentTracker;
use crate::error::EngineError;

/// The command installed for the controller's self-scheduled wake-up.
pub const TICK_COMMAND: &str = "/usr/bin/hottubd tick";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlDecision {
    /// `!active`: the tick did nothing.
    Inactive,
    TargetReached { heater_turned_off: bool },
    Heating { cron_scheduled: bool },
}

/// Round `now` up to the next minute boundary, pushing out one more minute
/// whenever less than 5s of safety margin would remain (§4.4). Guarantees
/// `result % 60 == 0`, `result > now`, `result - now >= 5`.
pub fn compute_next_wake_up_epoch_s(now_epoch_s: u64) -> u64 {
    let next_minute = now_epoch_s.div_ceil(60) * 60;
    if next_minute - now_epoch_s < 5 {
        next_minute + 60
    } else {
        next_minute
    }
}

pub struct Controller<'a, C: Clock> {
    target_store: TargetStateStore,
    equipment: &'a EquipmentTracker<C>,
    sensors: SensorCache,
    webhook: &'a dyn WebhookClient,
    cron: &'a CronService<'a>,
    clock: C,
}

impl<'a, C: Clock> Controller<'a, C> {
    pub fn new(
        target_store: TargetStateStore,
        equipment: &'a EquipmentTracker<C>,
        sensors: SensorCache,
        webhook: &'a dyn WebhookClient,
        cron: &'a CronService<'a>,
        clock: C,
    ) -> Self {
        Self { target_store, equipment, sensors, webhook, cron, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.epoch_ms() as i64).single().unwrap_or_else(Utc::now)
    }

    fn current_water_temp_f(&self) -> Result<f64, EngineError> {
        self.sensors.get_latest()?.map(|r| r.water_temp_f).ok_or(EngineError::NoSensorReading)
    }

    fn controller_marker() -> Marker {
        Marker::new(JobId::controller().to_string(), "HEAT-TARGET", Scope::Once)
    }

    /// `start(target)`: validate, persist `active=true`, then immediately
    /// tick so a start that's already above target resolves in one call.
    pub async fn start(&self, target_temp_f: f64) -> Result<ControlDecision, EngineError> {
        let state = HeatingTargetState::start(target_temp_f, self.now())?;
        self.target_store.put(&state)?;
        self.check_and_adjust().await
    }

    /// `stop()`: clear state, force the heater off if it's on (webhook
    /// failure here is logged and swallowed — cleanup must still
    /// complete), and remove every `heat-target` task-table entry.
    pub async fn stop(&self) -> Result<(), EngineError> {
        let equipment = self.equipment.get_status()?;
        if equipment.heater.on {
            if let Err(err) = self.webhook.trigger(EVENT_HEAT_OFF).await {
                tracing::error!(?err, "heat-off webhook failed during stop; state cleanup proceeds regardless");
            }
            self.equipment.set_heater(false)?;
        }
        self.target_store.put(&HeatingTargetState::stopped())?;
        self.cron.remove_by_pattern(JobId::CONTROLLER_PREFIX).await?;
        Ok(())
    }

    /// `checkAndAdjust()`: the tick.
    pub async fn check_and_adjust(&self) -> Result<ControlDecision, EngineError> {
        let target_state = self.target_store.get()?;
        let Some(target) = (target_state.active.then_some(target_state.target_temp_f).flatten()) else {
            return Ok(ControlDecision::Inactive);
        };

        let current = self.current_water_temp_f()?;
        let equipment = self.equipment.get_status()?;

        if current >= target {
            let was_on = equipment.heater.on;
            if was_on {
                self.webhook.trigger(EVENT_HEAT_OFF).await?;
                self.equipment.set_heater(false)?;
            }
            self.target_store.put(&HeatingTargetState::stopped())?;
            self.cron.remove_by_pattern(JobId::CONTROLLER_PREFIX).await?;
            // A wake-up installed by a concurrent invocation between the
            // decide step above and here would otherwise survive this
            // tick's cleanup — remove again to close that window.
            self.cron.remove_by_pattern(JobId::CONTROLLER_PREFIX).await?;
            tracing::info!(target, current, "target reached");
            return Ok(ControlDecision::TargetReached { heater_turned_off: was_on });
        }

        if !equipment.heater.on {
            // State write follows the webhook here, not the reverse: a
            // failed heat-on must leave the tracker untouched and defer
            // to the next tick rather than record a heater state the
            // equipment never actually reached.
            self.webhook.trigger(EVENT_HEAT_ON).await?;
            self.equipment.set_heater(true)?;
        }

        let now_s = self.now().timestamp().max(0) as u64;
        let wake_up_s = compute_next_wake_up_epoch_s(now_s);
        let wake_up_at = Utc.timestamp_opt(wake_up_s as i64, 0).single().unwrap_or_else(Utc::now);
        self.cron.schedule_at(wake_up_at, TICK_COMMAND, &Self::controller_marker()).await?;

        tracing::info!(target, current, wake_up = %wake_up_at, "continuing to heat");
        Ok(ControlDecision::Heating { cron_scheduled: true })
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
