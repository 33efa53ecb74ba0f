// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only access to the sensor cache the (out-of-scope) ingest endpoint
//! writes to `state/esp32-temperature.json`.

use std::path::{Path, PathBuf};

use hottub_core::SensorReading;

use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct SensorCache {
    path: PathBuf,
}

impl SensorCache {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self { path: state_dir.as_ref().join("esp32-temperature.json") }
    }

    /// `None` if no sensor has ever reported in, distinct from a read
    /// error — callers (notably `stop()`) must tolerate this.
    pub fn get_latest(&self) -> Result<Option<SensorReading>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let reading = serde_json::from_str(&text)
                    .map_err(|source| StorageError::Deserialize { path: self.path.clone(), source })?;
                Ok(Some(reading))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path: self.path.clone(), source }),
        }
    }
}

#[cfg(test)]
#[path = "sensor_cache_tests.rs"]
mod tests;
