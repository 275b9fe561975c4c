//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{BeaconEvent, EventFilter};
use crate::subscriber::{EventSubscriber, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Trait for publishing events to the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    async fn publish(&self, event: BeaconEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<BeaconEvent>,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: BeaconEvent) -> usize {
        let topic = event.topic();

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(topic = ?topic, receivers = receiver_count, "Event published");
                receiver_count
            }
            Err(_) => {
                debug!(topic = ?topic, "Event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
