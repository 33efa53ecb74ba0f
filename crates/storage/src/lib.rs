// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hottub-storage: file-backed persistence for every piece of state the
//! controller and scheduler own — singleton state files, per-job records,
//! and the append-only logs the estimator mines.

pub mod atomic;
pub mod error;
pub mod job_store;
pub mod logs;
pub mod sensor_cache;
pub mod singletons;

pub use atomic::{append_line, read_json_or_default, write_json_atomic};
pub use error::StorageError;
pub use job_store::JobRecordStore;
pub use logs::{read_all_temperature_logs, EquipmentEventLogWriter, TemperatureLogWriter};
pub use sensor_cache::SensorCache;
pub use singletons::{CharacteristicsStore, EquipmentStatusStore, TargetStateStore};
