// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C11: schedule-bound liveness monitoring for scheduled jobs. Every
//! operation is a no-op when no API key/base URL is configured — the
//! scheduler must work without this collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckHandle {
    pub uuid: String,
    pub ping_url: String,
}

#[async_trait]
pub trait HealthCheckMonitor: Send + Sync {
    fn is_enabled(&self) -> bool;
    async fn create_check(
        &self,
        name: &str,
        cron_schedule: &str,
        timezone: &str,
        grace_seconds: u64,
    ) -> Result<Option<CheckHandle>, AdapterError>;
    async fn ping(&self, ping_url: &str) -> Result<bool, AdapterError>;
    async fn delete(&self, uuid: &str) -> Result<bool, AdapterError>;
}

#[derive(Debug, Serialize)]
struct CreateCheckRequest<'a> {
    name: &'a str,
    schedule: &'a str,
    tz: &'a str,
    grace: u64,
}

#[derive(Debug, Deserialize)]
struct CreateCheckResponse {
    uuid: String,
    ping_url: String,
}

pub struct HttpHealthCheckMonitor {
    client: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl HttpHealthCheckMonitor {
    pub fn new(base_url: Option<String>, api_key: Option<String>, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder().timeout(timeout).build().unwrap_or_else(|_| reqwest::Client::new());
        Self { client, base_url, api_key }
    }
}

#[async_trait]
impl HealthCheckMonitor for HttpHealthCheckMonitor {
    fn is_enabled(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    async fn create_check(
        &self,
        name: &str,
        cron_schedule: &str,
        timezone: &str,
        grace_seconds: u64,
    ) -> Result<Option<CheckHandle>, AdapterError> {
        let (Some(base_url), Some(api_key)) = (&self.base_url, &self.api_key) else {
            return Ok(None);
        };
        let url = format!("{}/checks", base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&CreateCheckRequest { name, schedule: cron_schedule, tz: timezone, grace: grace_seconds })
            .send()
            .await
            .map_err(AdapterError::from)?;
        if !response.status().is_success() {
            return Err(AdapterError::HealthCheck(format!("create_check returned {}", response.status())));
        }
        let body: CreateCheckResponse = response.json().await.map_err(AdapterError::from)?;
        Ok(Some(CheckHandle { uuid: body.uuid, ping_url: body.ping_url }))
    }

    async fn ping(&self, ping_url: &str) -> Result<bool, AdapterError> {
        if !self.is_enabled() {
            return Ok(true);
        }
        let response = self.client.get(ping_url).send().await.map_err(AdapterError::from)?;
        Ok(response.status().is_success())
    }

    async fn delete(&self, uuid: &str) -> Result<bool, AdapterError> {
        let (Some(base_url), Some(api_key)) = (&self.base_url, &self.api_key) else {
            return Ok(true);
        };
        let url = format!("{}/checks/{}", base_url.trim_end_matches('/'), uuid);
        let response = self.client.delete(&url).bearer_auth(api_key).send().await.map_err(AdapterError::from)?;
        Ok(response.status().is_success())
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    pub struct FakeHealthCheckMonitor {
        pub enabled: bool,
        pub pings: Mutex<Vec<String>>,
        pub deleted: Mutex<Vec<String>>,
    }

    impl FakeHealthCheckMonitor {
        pub fn enabled() -> Self {
            Self { enabled: true, ..Default::default() }
        }
    }

    #[async_trait]
    impl HealthCheckMonitor for FakeHealthCheckMonitor {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        async fn create_check(
            &self,
            name: &str,
            _cron_schedule: &str,
            _timezone: &str,
            _grace_seconds: u64,
        ) -> Result<Option<CheckHandle>, AdapterError> {
            if !self.enabled {
                return Ok(None);
            }
            Ok(Some(CheckHandle { uuid: format!("fake-{name}"), ping_url: format!("https://fake.local/ping/{name}") }))
        }

        async fn ping(&self, ping_url: &str) -> Result<bool, AdapterError> {
            self.pings.lock().push(ping_url.to_string());
            Ok(true)
        }

        async fn delete(&self, uuid: &str) -> Result<bool, AdapterError> {
            self.deleted.lock().push(uuid.to_string());
            Ok(true)
        }
    }
}

#[cfg(test)]
#[path = "healthcheck_tests.rs"]
mod tests;
