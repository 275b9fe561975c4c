//! Driven Ports (SPI - Outbound Dependencies)

use crate::error::PositionResult;
use async_trait::async_trait;
use shared_types::Coordinate;

/// Device geolocation.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// One resolved fix, or why there is none.
    async fn current_position(&self) -> PositionResult<Coordinate>;
}
