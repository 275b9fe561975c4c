//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::RegistryResult;
use async_trait::async_trait;

/// Remote location of the facility table.
///
/// Implementations return the raw payload bytes. Transport problems map to
/// `RegistryError::Unreachable`; parsing is the registry's job, not the
/// source's. The registry applies its own fetch timeout around this call.
#[async_trait]
pub trait FacilitySource: Send + Sync {
    /// Fetch the current table.
    async fn fetch(&self) -> RegistryResult<Vec<u8>>;

    /// Human-readable origin used in logs.
    fn describe(&self) -> String;
}
