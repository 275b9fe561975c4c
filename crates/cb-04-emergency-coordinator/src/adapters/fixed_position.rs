//! Position source pinned to one coordinate.

use crate::error::PositionResult;
use crate::ports::outbound::PositionSource;
use async_trait::async_trait;
use shared_types::Coordinate;

/// Always reports the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedPositionSource {
    position: Coordinate,
}

impl FixedPositionSource {
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn current_position(&self) -> PositionResult<Coordinate> {
        Ok(self.position)
    }
}
