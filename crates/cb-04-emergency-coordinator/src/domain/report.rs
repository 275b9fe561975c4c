//! Terminal results of a trigger.

use crate::error::FailureReason;
use cb_03_alert_dispatch::DispatchResult;
use serde::Serialize;
use shared_bus::TriggerId;
use shared_types::{AlertMessage, Coordinate, FacilityRecord};

/// Everything the presentation layer needs after a completed trigger.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyReport {
    pub trigger_id: TriggerId,
    pub origin: Coordinate,
    /// Nearest facility, `None` when the registry snapshot was empty.
    pub facility: Option<FacilityRecord>,
    pub distance_m: Option<f64>,
    pub message: AlertMessage,
    pub dispatch: DispatchResult,
}

/// Terminal state of `trigger_emergency`.
#[derive(Debug, Clone, Serialize)]
pub enum EmergencyResult {
    /// Dispatch ran; individual recipients may still have failed.
    Completed(EmergencyReport),
    /// Nothing (or nothing further) was dispatched.
    Failed {
        trigger_id: TriggerId,
        reason: FailureReason,
    },
}

impl EmergencyResult {
    pub fn trigger_id(&self) -> TriggerId {
        match self {
            Self::Completed(report) => report.trigger_id,
            Self::Failed { trigger_id, .. } => *trigger_id,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn report(&self) -> Option<&EmergencyReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}
