// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hottub_core::{CoreError, JobId};
use hottub_adapters::AdapterError;
use hottub_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("job {0} not found")]
    JobNotFound(JobId),

    #[error("characteristics are missing required fields to plan a ready-by schedule: {0}")]
    MissingCharacteristics(&'static str),

    #[error("no sensor reading is available yet")]
    NoSensorReading,

    #[error("ready-by time {0:?} could not be parsed into an absolute instant")]
    InvalidReadyByTime(String),
}
