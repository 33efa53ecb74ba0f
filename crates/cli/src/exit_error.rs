// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use hottub_core::CoreError;
use hottub_engine::EngineError;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

/// Maps the engine's error taxonomy onto process exit codes: usage errors
/// that the caller can fix (2), transient collaborator failures worth a
/// retry (3), and everything else (1).
impl From<EngineError> for ExitError {
    fn from(err: EngineError) -> Self {
        let code = match &err {
            EngineError::Core(CoreError::TargetOutOfRange(_))
            | EngineError::Core(CoreError::InvalidDailyTime(_))
            | EngineError::Core(CoreError::ScheduledTimeInPast)
            | EngineError::JobNotFound(_)
            | EngineError::MissingCharacteristics(_)
            | EngineError::InvalidReadyByTime(_) => 2,
            EngineError::Adapter(_) | EngineError::NoSensorReading => 3,
            _ => 1,
        };
        ExitError::new(code, err.to_string())
    }
}

impl From<hottub_core::ConfigError> for ExitError {
    fn from(err: hottub_core::ConfigError) -> Self {
        ExitError::new(2, err.to_string())
    }
}
