//! Driving Ports (API - Inbound)

use crate::domain::{EmergencyResult, EmergencyStage};
use async_trait::async_trait;

/// Primary Emergency API, called by the presentation layer's SOS action.
#[async_trait]
pub trait EmergencyApi: Send + Sync {
    /// Run one locate → resolve → dispatch cycle to a terminal state.
    async fn trigger_emergency(&self) -> EmergencyResult;

    /// Stage of the running trigger, or of the last one.
    fn stage(&self) -> EmergencyStage;
}
