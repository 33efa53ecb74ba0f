// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error type for validation failures raised by core model types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("target temperature {0} is outside the allowed range [{min}, {max}]", min = crate::target::MIN_TARGET_F, max = crate::target::MAX_TARGET_F)]
    TargetOutOfRange(f64),

    #[error("unknown job action: {0}")]
    UnknownAction(String),

    #[error("scheduled time is in the past")]
    ScheduledTimeInPast,

    #[error("invalid task-table marker: {0}")]
    InvalidMarker(String),

    #[error("invalid daily time spec {0:?}: expected HH:MM or HH:MM±HH:MM")]
    InvalidDailyTime(String),
}
