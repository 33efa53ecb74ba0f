// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("webhook request failed: {0}")]
    WebhookRequest(#[from] reqwest::Error),

    #[error("webhook responded with non-success status {0}")]
    WebhookStatus(u16),

    #[error("failed to run crontab: {0}")]
    CrontabSpawn(std::io::Error),

    #[error("crontab exited with status {0}")]
    CrontabStatus(i32),

    #[error("task table read returned empty output twice in a row; refusing to write")]
    TaskTableReadExhausted,

    #[error("health-check api error: {0}")]
    HealthCheck(String),
}
