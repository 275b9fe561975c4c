//! Driving Ports (API - Inbound)

use crate::domain::DispatchResult;
use async_trait::async_trait;
use shared_types::{AlertMessage, RecipientChannel};
use std::time::Duration;

/// Primary Alert Dispatch API
///
/// Neither operation fails as a whole: every recipient gets an outcome, in
/// input order, and the aggregate says whether all of them succeeded.
#[async_trait]
pub trait AlertDispatchApi: Send + Sync {
    /// Deliver `message` to every channel concurrently.
    async fn dispatch(&self, message: &AlertMessage, channels: &[RecipientChannel])
        -> DispatchResult;

    /// Re-issue only the channels that failed in `previous`.
    ///
    /// Successful outcomes are carried over untouched and never re-sent.
    async fn retry_failed(&self, message: &AlertMessage, previous: &DispatchResult)
        -> DispatchResult;

    /// Longest a single recipient can take before its outcome is a timeout.
    fn send_timeout(&self) -> Duration;
}
