// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration: built-in defaults, an optional TOML file, then
//! `HOTTUB_*` environment overrides, in ascending priority.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, #[source] source: toml::de::Error },

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// A secret value whose `Debug` impl never prints the underlying string.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret(Option<String>);

impl Secret {
    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_some() {
            write!(f, "Some(\"<redacted>\")")
        } else {
            write!(f, "None")
        }
    }
}

impl From<Option<String>> for Secret {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotTubConfig {
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,
    pub webhook_base_url: String,
    pub healthcheck_base_url: Option<String>,
    #[serde(skip)]
    pub healthcheck_api_key: Secret,
    pub sensor_poll_interval_on_s: u64,
    pub sensor_poll_interval_off_s: u64,
    pub request_timeout_ms: u64,
}

impl Default for HotTubConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from("/var/lib/hottub/state"),
            log_dir: PathBuf::from("/var/lib/hottub/logs"),
            webhook_base_url: String::new(),
            healthcheck_base_url: None,
            healthcheck_api_key: Secret::default(),
            sensor_poll_interval_on_s: 60,
            sensor_poll_interval_off_s: 300,
            request_timeout_ms: 5000,
        }
    }
}

impl HotTubConfig {
    pub fn scheduled_jobs_dir(&self) -> PathBuf {
        self.state_dir.join("scheduled-jobs")
    }

    pub fn healthcheck_enabled(&self) -> bool {
        self.healthcheck_base_url.is_some() && self.healthcheck_api_key.is_set()
    }

    /// Resolve defaults → TOML file (if present) → `HOTTUB_*` env vars.
    pub fn load(cli_override: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = cli_override
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOTTUB_CONFIG").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("/etc/hottub/config.toml"));

        if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path: path.clone(), source })?;
            let file_config: HotTubConfig =
                toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
            config = file_config;
        }

        if let Ok(v) = std::env::var("HOTTUB_STATE_DIR") {
            config.state_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("HOTTUB_LOG_DIR") {
            config.log_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("HOTTUB_WEBHOOK_BASE_URL") {
            config.webhook_base_url = v;
        }
        if let Ok(v) = std::env::var("HOTTUB_HEALTHCHECK_BASE_URL") {
            config.healthcheck_base_url = Some(v);
        }
        if let Ok(v) = std::env::var("HOTTUB_HEALTHCHECK_API_KEY") {
            config.healthcheck_api_key = Secret::from(Some(v));
        }
        if let Ok(v) = std::env::var("HOTTUB_SENSOR_POLL_INTERVAL_ON_S") {
            config.sensor_poll_interval_on_s =
                v.parse().map_err(|_| ConfigError::Invalid { key: "HOTTUB_SENSOR_POLL_INTERVAL_ON_S", value: v })?;
        }
        if let Ok(v) = std::env::var("HOTTUB_SENSOR_POLL_INTERVAL_OFF_S") {
            config.sensor_poll_interval_off_s =
                v.parse().map_err(|_| ConfigError::Invalid { key: "HOTTUB_SENSOR_POLL_INTERVAL_OFF_S", value: v })?;
        }
        if let Ok(v) = std::env::var("HOTTUB_REQUEST_TIMEOUT_MS") {
            config.request_timeout_ms =
                v.parse().map_err(|_| ConfigError::Invalid { key: "HOTTUB_REQUEST_TIMEOUT_MS", value: v })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
