// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! C2: the outbound webhook trigger used to energize/de-energize the
//! heater via a smart-outlet integration.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AdapterError;

pub const EVENT_HEAT_ON: &str = "hot-tub-heat-on";
pub const EVENT_HEAT_OFF: &str = "hot-tub-heat-off";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebhookResult {
    pub success: bool,
}

#[async_trait]
pub trait WebhookClient: Send + Sync {
    async fn trigger(&self, event_name: &str) -> Result<WebhookResult, AdapterError>;
}

#[derive(Debug, Serialize)]
struct TriggerRequest<'a> {
    event: &'a str,
}

pub struct HttpWebhookClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWebhookClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, base_url: base_url.into() }
    }
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
    async fn trigger(&self, event_name: &str) -> Result<WebhookResult, AdapterError> {
        let url = format!("{}/trigger", self.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).json(&TriggerRequest { event: event_name }).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(WebhookResult { success: true })
        } else {
            tracing::error!(event = event_name, status = status.as_u16(), "webhook trigger failed");
            Err(AdapterError::WebhookStatus(status.as_u16()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeWebhookClient {
        pub fired: Mutex<Vec<String>>,
        pub fail_events: Mutex<Vec<String>>,
    }

    impl FakeWebhookClient {
        pub fn fail(&self, event: &str) {
            self.fail_events.lock().unwrap_or_else(|e| e.into_inner()).push(event.to_string());
        }
    }

    #[async_trait]
    impl WebhookClient for FakeWebhookClient {
        async fn trigger(&self, event_name: &str) -> Result<WebhookResult, AdapterError> {
            self.fired.lock().unwrap_or_else(|e| e.into_inner()).push(event_name.to_string());
            if self.fail_events.lock().unwrap_or_else(|e| e.into_inner()).contains(&event_name.to_string()) {
                return Err(AdapterError::WebhookStatus(503));
            }
            Ok(WebhookResult { success: true })
        }
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
