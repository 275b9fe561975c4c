//! Scriptable in-memory SMS gateway.

use crate::domain::SmsReceipt;
use crate::error::{GatewayError, GatewayResult};
use crate::ports::outbound::SmsGateway;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

/// Gateway that succeeds by default, with per-recipient failures and delays.
#[derive(Default)]
pub struct MockSmsGateway {
    failures: RwLock<HashMap<String, GatewayError>>,
    delays: RwLock<HashMap<String, Duration>>,
    sent: RwLock<Vec<(String, String)>>,
}

impl MockSmsGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send to `recipient` with `error`.
    pub fn fail_for(&self, recipient: impl Into<String>, error: GatewayError) {
        self.failures.write().insert(recipient.into(), error);
    }

    /// Let sends to `recipient` succeed again.
    pub fn clear_failure(&self, recipient: &str) {
        self.failures.write().remove(recipient);
    }

    /// Sleep for `delay` before answering sends to `recipient`.
    pub fn delay_for(&self, recipient: impl Into<String>, delay: Duration) {
        self.delays.write().insert(recipient.into(), delay);
    }

    /// Every `(recipient, body)` the gateway was asked to send, in call order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().clone()
    }

    /// Number of sends attempted for `recipient`.
    pub fn send_count(&self, recipient: &str) -> usize {
        self.sent.read().iter().filter(|(to, _)| to == recipient).count()
    }

    pub fn total_sends(&self) -> usize {
        self.sent.read().len()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_sms(&self, recipient: &str, body: &str) -> GatewayResult<SmsReceipt> {
        self.sent
            .write()
            .push((recipient.to_string(), body.to_string()));

        let delay = self.delays.read().get(recipient).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.read().get(recipient).cloned();
        match failure {
            Some(error) => Err(error),
            None => Ok(SmsReceipt {
                sid: Some(format!("MOCK-{}", self.total_sends())),
            }),
        }
    }
}
