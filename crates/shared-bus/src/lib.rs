//! # Shared Bus - Event Bus for Lifecycle Events
//!
//! Carries observable lifecycle events between the Care-Beacon subsystems and
//! whatever presentation layer sits on top of them.
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Facility Registry│                    │ Presentation     │
//! │ Coordinator      │    publish()       │ (dashboards,     │
//! │                  │ ──────┐            │  alert banners)  │
//! └──────────────────┘       │            └──────────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │          │
//!                      │              │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! Publishing never blocks and never fails the publisher: with no subscribers
//! the event is dropped and counted.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{BeaconEvent, EventFilter, EventTopic, TriggerId};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
