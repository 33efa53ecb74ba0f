// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `scheduled-jobs/<jobId>.json` — one file per job record.

use std::path::{Path, PathBuf};

use hottub_core::{JobId, JobRecord};

use crate::atomic::write_json_atomic;
use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct JobRecordStore {
    dir: PathBuf,
}

impl JobRecordStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self { dir: state_dir.as_ref().join("scheduled-jobs") }
    }

    fn path_for(&self, job_id: &JobId) -> PathBuf {
        self.dir.join(format!("{job_id}.json"))
    }

    pub fn put(&self, record: &JobRecord) -> Result<(), StorageError> {
        write_json_atomic(&self.path_for(&record.job_id), record)
    }

    pub fn get(&self, job_id: &JobId) -> Result<Option<JobRecord>, StorageError> {
        let path = self.path_for(job_id);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                serde_json::from_str(&text).map(Some).map_err(|source| StorageError::Deserialize { path, source })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    pub fn delete(&self, job_id: &JobId) -> Result<bool, StorageError> {
        let path = self.path_for(job_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }

    /// All persisted records, in no particular order — callers sort by
    /// `scheduled_time` as needed.
    pub fn list(&self) -> Result<Vec<JobRecord>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.dir).map_err(|source| StorageError::Read { path: self.dir.clone(), source })?;
        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::Read { path: self.dir.clone(), source })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|source| StorageError::Read { path: path.clone(), source })?;
            match serde_json::from_str::<JobRecord>(&text) {
                Ok(record) => records.push(record),
                Err(source) => return Err(StorageError::Deserialize { path, source }),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "job_store_tests.rs"]
mod tests;
