//! HTTP Facility Source
//!
//! Implements `FacilitySource` with a plain GET against the directory URL.

use crate::error::{RegistryError, RegistryResult};
use crate::ports::outbound::FacilitySource;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fetches the facility table over HTTP(S).
pub struct HttpFacilitySource {
    client: Client,
    url: String,
}

impl HttpFacilitySource {
    /// Create a source for `url`, bounding each request by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> RegistryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .build()
            .map_err(|e| RegistryError::unreachable(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl FacilitySource for HttpFacilitySource {
    async fn fetch(&self) -> RegistryResult<Vec<u8>> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::unreachable(format!("request to {} timed out", self.url))
            } else {
                RegistryError::unreachable(format!("request to {} failed: {e}", self.url))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::unreachable(format!(
                "{} returned HTTP {status}",
                self.url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RegistryError::unreachable(format!("body read failed: {e}")))?;
        debug!(url = %self.url, bytes = body.len(), "Facility table downloaded");
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
