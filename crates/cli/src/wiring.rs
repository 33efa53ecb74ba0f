// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the owned, long-lived collaborators every command wires together.
//! Each command borrows from a [`Deps`] to assemble the engine components it
//! actually needs (a [`hottub_engine::cron_service::CronService`], a
//! [`hottub_engine::equipment::EquipmentTracker`], ...) as local values —
//! the borrow graph between them is too self-referential to hold inside a
//! single struct without a lifetime the CLI has no use for, since every
//! invocation does exactly one operation and exits.

use std::time::Duration;

use hottub_adapters::healthcheck::HttpHealthCheckMonitor;
use hottub_adapters::task_table::CrontabAdapter;
use hottub_adapters::webhook::HttpWebhookClient;
use hottub_core::{ConfigError, HotTubConfig, SystemClock};
use hottub_storage::{
    CharacteristicsStore, EquipmentEventLogWriter, EquipmentStatusStore, JobRecordStore, SensorCache, TargetStateStore, TemperatureLogWriter,
};

pub struct Deps {
    pub config: HotTubConfig,
    pub clock: SystemClock,
    pub task_table: CrontabAdapter,
    pub webhook: HttpWebhookClient,
    pub healthcheck: HttpHealthCheckMonitor,
    pub records: JobRecordStore,
    pub target_store: TargetStateStore,
    pub equipment_store: EquipmentStatusStore,
    pub characteristics: CharacteristicsStore,
    pub sensors: SensorCache,
    pub event_log: EquipmentEventLogWriter,
    pub temperature_log: TemperatureLogWriter,
}

impl Deps {
    pub fn load(config_override: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let config = HotTubConfig::load(config_override)?;
        std::fs::create_dir_all(&config.state_dir).map_err(|source| ConfigError::Read { path: config.state_dir.clone(), source })?;
        std::fs::create_dir_all(&config.log_dir).map_err(|source| ConfigError::Read { path: config.log_dir.clone(), source })?;
        std::fs::create_dir_all(config.scheduled_jobs_dir()).map_err(|source| ConfigError::Read { path: config.scheduled_jobs_dir(), source })?;

        let timeout = Duration::from_millis(config.request_timeout_ms);
        let webhook = HttpWebhookClient::new(config.webhook_base_url.clone(), timeout);
        let healthcheck =
            HttpHealthCheckMonitor::new(config.healthcheck_base_url.clone(), config.healthcheck_api_key.get().map(str::to_string), timeout);

        Ok(Self {
            records: JobRecordStore::new(&config.state_dir),
            target_store: TargetStateStore::new(&config.state_dir),
            equipment_store: EquipmentStatusStore::new(&config.state_dir),
            characteristics: CharacteristicsStore::new(&config.state_dir),
            sensors: SensorCache::new(&config.state_dir),
            event_log: EquipmentEventLogWriter::new(&config.log_dir),
            temperature_log: TemperatureLogWriter::new(&config.log_dir),
            task_table: CrontabAdapter::default(),
            clock: SystemClock,
            config,
            webhook,
            healthcheck,
        })
    }

    pub fn healthcheck_grace_seconds(&self) -> u64 {
        self.config.sensor_poll_interval_on_s.max(self.config.sensor_poll_interval_off_s) * 2
    }
}
