// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hottub-core: shared model types, clock abstraction, and cron/marker
//! formatting used by every other hottub crate.

pub mod macros;

pub mod characteristics;
pub mod clock;
pub mod config;
pub mod equipment;
pub mod error;
pub mod id;
pub mod job;
pub mod log_rows;
pub mod marker;
pub mod sensor;
pub mod target;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use characteristics::{HeatingCharacteristics, COLD_FLOOR_F, SAFETY_MARGIN_MINUTES};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, HotTubConfig, Secret};
pub use equipment::{EquipmentStatus, Relay, PUMP_AUTO_OFF};
pub use error::CoreError;
pub use id::{short, IdBuf, JobId};
pub use job::{normalize_api_base_url, JobAction, JobRecord};
pub use log_rows::{Equipment, EquipmentEventRow, RelayAction, TemperatureLogRow};
pub use marker::{parse_daily_time, Marker, Scope};
pub use sensor::{calibrated_fahrenheit, celsius_to_fahrenheit, poll_interval_seconds, Sensor, SensorReading};
pub use target::{HeatingTargetState, MAX_TARGET_F, MIN_TARGET_F, SCHEDULE_MAX_TARGET_F, SCHEDULE_MIN_TARGET_F};
pub use time_fmt::{cron_fields_at, host_timezone, next_daily_occurrence, CronFields};
