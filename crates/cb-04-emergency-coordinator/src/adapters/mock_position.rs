//! Scriptable position source for tests.

use crate::error::{PositionError, PositionResult};
use crate::ports::outbound::PositionSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Coordinate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Returns a configurable result after an optional delay and counts requests.
pub struct MockPositionSource {
    response: RwLock<PositionResult<Coordinate>>,
    delay: RwLock<Option<Duration>>,
    requests: AtomicUsize,
}

impl MockPositionSource {
    pub fn returning(position: Coordinate) -> Self {
        Self::with_response(Ok(position))
    }

    pub fn failing(error: PositionError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: PositionResult<Coordinate>) -> Self {
        Self {
            response: RwLock::new(response),
            delay: RwLock::new(None),
            requests: AtomicUsize::new(0),
        }
    }

    /// Replace the response for subsequent requests.
    pub fn set_response(&self, response: PositionResult<Coordinate>) {
        *self.response.write() = response;
    }

    /// Wait `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = Some(delay);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionSource for MockPositionSource {
    async fn current_position(&self) -> PositionResult<Coordinate> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.response.read().clone()
    }
}
