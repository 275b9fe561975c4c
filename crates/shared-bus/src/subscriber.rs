//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{BeaconEvent, EventFilter};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// Trait for subscribing to events from the bus.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe to events matching a filter.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

/// A subscription handle for receiving events.
pub struct Subscription {
    receiver: broadcast::Receiver<BeaconEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<BeaconEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` once the bus is dropped.
    pub async fn recv(&mut self) -> Option<BeaconEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some events dropped");
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available and matched
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<BeaconEvent>, SubscriptionError> {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(e) => e,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&event) {
                return Ok(Some(event));
            }
        }
    }

    /// Drain every matching event currently buffered.
    pub fn drain(&mut self) -> Vec<BeaconEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}
