// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only logs: per-reading temperature samples (rotated daily) and
//! equipment on/off events (one file).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hottub_core::{EquipmentEventRow, TemperatureLogRow};

use crate::atomic::append_line;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct TemperatureLogWriter {
    log_dir: PathBuf,
}

impl TemperatureLogWriter {
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self { log_dir: log_dir.as_ref().to_path_buf() }
    }

    fn path_for(&self, at: DateTime<Utc>) -> PathBuf {
        self.log_dir.join(format!("temperature-{}.log", at.format("%Y-%m-%d")))
    }

    pub fn append(&self, row: &TemperatureLogRow) -> Result<(), StorageError> {
        let path = self.path_for(row.timestamp);
        let line = serde_json::to_string(row).map_err(|source| StorageError::Serialize { path: path.clone(), source })?;
        append_line(&path, &line)
    }
}

#[derive(Debug, Clone)]
pub struct EquipmentEventLogWriter {
    path: PathBuf,
}

impl EquipmentEventLogWriter {
    pub fn new(log_dir: impl AsRef<Path>) -> Self {
        Self { path: log_dir.as_ref().join("equipment-events.log") }
    }

    pub fn append(&self, row: &EquipmentEventRow) -> Result<(), StorageError> {
        let line = serde_json::to_string(row).map_err(|source| StorageError::Serialize { path: self.path.clone(), source })?;
        append_line(&self.path, &line)
    }

    /// All recorded events, oldest first (files are append-only so file
    /// order is chronological order).
    pub fn read_all(&self) -> Result<Vec<EquipmentEventRow>, StorageError> {
        read_jsonl_lenient(&self.path)
    }
}

/// Read every `temperature-*.log` file under `log_dir`, concatenated in
/// filename (and therefore date) order.
pub fn read_all_temperature_logs(log_dir: &Path) -> Result<Vec<TemperatureLogRow>, StorageError> {
    let pattern = log_dir.join("temperature-*.log");
    let pattern_str = pattern.to_string_lossy();
    let mut paths: Vec<PathBuf> = glob::glob(&pattern_str)
        .map_err(|_| StorageError::Read { path: log_dir.to_path_buf(), source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad glob pattern") })?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    let mut rows = Vec::new();
    for path in paths {
        rows.extend(read_jsonl_lenient::<TemperatureLogRow>(&path)?);
    }
    Ok(rows)
}

/// Parse a JSONL file, skipping (not erroring on) malformed trailing lines
/// — an append can be interrupted by a crash mid-write.
fn read_jsonl_lenient<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(StorageError::Read { path: path.to_path_buf(), source }),
    };
    Ok(text.lines().filter(|l| !l.trim().is_empty()).filter_map(|line| serde_json::from_str(line).ok()).collect())
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
