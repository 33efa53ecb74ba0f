// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C5: the equipment-status tracker. Owns `equipment-status.json`
//! exclusively and applies the pump auto-off policy on every read.

use chrono::{TimeZone, Utc};
use hottub_core::{Clock, Equipment, EquipmentEventRow, EquipmentStatus, RelayAction};
use hottub_storage::{EquipmentEventLogWriter, EquipmentStatusStore, SensorCache};

use crate::error::EngineError;

pub struct EquipmentTracker<C: Clock> {
    store: EquipmentStatusStore,
    event_log: EquipmentEventLogWriter,
    sensors: SensorCache,
    clock: C,
}

impl<C: Clock> EquipmentTracker<C> {
    pub fn new(store: EquipmentStatusStore, event_log: EquipmentEventLogWriter, sensors: SensorCache, clock: C) -> Self {
        Self { store, event_log, sensors, clock }
    }

    fn now(&self) -> chrono::DateTime<Utc> {
        Utc.timestamp_millis_opt(self.clock.epoch_ms() as i64).single().unwrap_or_else(Utc::now)
    }

    /// Read current status, applying (and persisting) the pump auto-off
    /// transition if one is due.
    pub fn get_status(&self) -> Result<EquipmentStatus, EngineError> {
        let mut status = self.store.get()?;
        if status.apply_pump_auto_off(self.now()) {
            self.store.put(&status)?;
            tracing::info!("pump auto-off applied after 2h idle window");
        }
        Ok(status)
    }

    fn latest_water_temp_f(&self) -> Option<f64> {
        self.sensors.get_latest().ok().flatten().map(|r| r.water_temp_f)
    }

    fn log_event(&self, equipment: Equipment, action: RelayAction) {
        let row = EquipmentEventRow { timestamp: self.now(), equipment, action, water_temp_f: self.latest_water_temp_f() };
        if let Err(err) = self.event_log.append(&row) {
            tracing::warn!(?err, "failed to append equipment event; state change still applied");
        }
    }

    pub fn set_heater(&self, on: bool) -> Result<(), EngineError> {
        let mut status = self.store.get()?;
        status.set_heater(on, self.now());
        self.store.put(&status)?;
        self.log_event(Equipment::Heater, if on { RelayAction::On } else { RelayAction::Off });
        Ok(())
    }

    pub fn set_pump(&self, on: bool) -> Result<(), EngineError> {
        let mut status = self.store.get()?;
        status.set_pump(on, self.now());
        self.store.put(&status)?;
        self.log_event(Equipment::Pump, if on { RelayAction::On } else { RelayAction::Off });
        Ok(())
    }
}

#[cfg(test)]
#[path = "equipment_tests.rs"]
mod tests;
