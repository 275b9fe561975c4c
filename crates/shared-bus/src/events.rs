//! # Beacon Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::Coordinate;
use uuid::Uuid;

/// Identifier of one emergency trigger, shared by every event it produces.
pub type TriggerId = Uuid;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BeaconEvent {
    // =========================================================================
    // FACILITY REGISTRY
    // =========================================================================
    /// A refresh published a new snapshot.
    RegistryRefreshed {
        /// Rows accepted into the snapshot.
        accepted: usize,
        /// Rows dropped as parse warnings.
        dropped: usize,
        /// Monotonic snapshot generation.
        generation: u64,
    },

    /// A refresh failed; the previous snapshot stays published.
    RegistryRefreshFailed {
        /// Error kind label (`unreachable`, `malformed`, `empty`).
        kind: String,
        /// Human-readable detail.
        reason: String,
    },

    // =========================================================================
    // EMERGENCY COORDINATOR
    // =========================================================================
    /// The coordinator entered a new stage.
    EmergencyStageChanged {
        trigger_id: TriggerId,
        /// Stage label (`locating_position`, `resolving_facility`, ...).
        stage: String,
    },

    /// The alert fan-out finished (possibly with partial failure).
    AlertDispatched {
        trigger_id: TriggerId,
        origin: Coordinate,
        /// Name of the recommended facility, if one was resolved.
        facility: Option<String>,
        succeeded: usize,
        failed: usize,
    },

    /// The trigger terminated without dispatching.
    EmergencyFailed {
        trigger_id: TriggerId,
        /// Reason label (`no_position`, `stage_timeout`, `already_in_progress`).
        reason: String,
    },
}

impl BeaconEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::RegistryRefreshed { .. } | Self::RegistryRefreshFailed { .. } => {
                EventTopic::FacilityRegistry
            }
            Self::EmergencyStageChanged { .. } | Self::EmergencyFailed { .. } => {
                EventTopic::Emergency
            }
            Self::AlertDispatched { .. } => EventTopic::AlertDispatch,
        }
    }

    /// Trigger this event belongs to, if any.
    #[must_use]
    pub fn trigger_id(&self) -> Option<TriggerId> {
        match self {
            Self::EmergencyStageChanged { trigger_id, .. }
            | Self::AlertDispatched { trigger_id, .. }
            | Self::EmergencyFailed { trigger_id, .. } => Some(*trigger_id),
            Self::RegistryRefreshed { .. } | Self::RegistryRefreshFailed { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Registry refresh results.
    FacilityRegistry,
    /// Coordinator stage transitions and failures.
    Emergency,
    /// Dispatch summaries.
    AlertDispatch,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Restrict to a single trigger. `None` means every trigger.
    pub trigger_id: Option<TriggerId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            trigger_id: None,
        }
    }

    /// Create a filter for the events of one trigger.
    #[must_use]
    pub fn for_trigger(trigger_id: TriggerId) -> Self {
        Self {
            topics: Vec::new(),
            trigger_id: Some(trigger_id),
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &BeaconEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let trigger_match = match self.trigger_id {
            None => true,
            Some(id) => event.trigger_id() == Some(id),
        };

        topic_match && trigger_match
    }
}
