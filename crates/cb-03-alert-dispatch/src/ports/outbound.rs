//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::SmsReceipt;
use crate::error::GatewayResult;
use async_trait::async_trait;

/// SMS delivery backend.
///
/// One call per recipient. The dispatcher wraps each call in its own timeout;
/// implementations should still fail fast on transport errors.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` to the normalized number `recipient`.
    async fn send_sms(&self, recipient: &str, body: &str) -> GatewayResult<SmsReceipt>;
}
