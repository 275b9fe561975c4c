//! HTTP SMS relay
//!
//! Speaks the relay protocol used by the mobile backend:
//!
//! ```text
//! POST <endpoint>   {"to": "+15550001111", "body": "..."}
//! 200 OK            {"success": true, "sid": "SM..."}
//! 4xx/5xx           {"success": false, "error": "..."}
//! ```

use crate::domain::SmsReceipt;
use crate::error::{GatewayError, GatewayResult};
use crate::ports::outbound::SmsGateway;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    success: bool,
    sid: Option<String>,
    error: Option<String>,
}

/// `SmsGateway` backed by an HTTP relay endpoint.
pub struct HttpSmsGateway {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSmsGateway {
    /// Create a gateway posting to `endpoint`, bounding each request by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|e| GatewayError::Unreachable {
                reason: format!("HTTP client init failed: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_transport(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            GatewayError::Unreachable {
                reason: format!("cannot connect to {}: {e}", self.endpoint),
            }
        } else {
            GatewayError::Unreachable {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl SmsGateway for HttpSmsGateway {
    async fn send_sms(&self, recipient: &str, body: &str) -> GatewayResult<SmsReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendRequest { to: recipient, body })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(e))?;
        let parsed = serde_json::from_str::<SendResponse>(&text).ok();
        debug!(recipient, %status, "Gateway responded");

        match parsed {
            Some(reply) if status.is_success() && reply.success => {
                Ok(SmsReceipt { sid: reply.sid })
            }
            Some(reply) => Err(GatewayError::Rejected {
                reason: reply
                    .error
                    .unwrap_or_else(|| format!("gateway reported failure (HTTP {status})")),
            }),
            None if status.is_success() => Err(GatewayError::Rejected {
                reason: "unreadable gateway response".to_string(),
            }),
            None => Err(GatewayError::Rejected {
                reason: format!("HTTP {status}"),
            }),
        }
    }
}
