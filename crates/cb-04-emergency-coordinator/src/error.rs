//! Error types for the Emergency Coordinator subsystem

use crate::domain::EmergencyStage;
use serde::Serialize;
use thiserror::Error;

/// Failure reported by a `PositionSource`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum PositionError {
    /// The user or platform refused location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider gave up waiting for a fix
    #[error("Location request timed out")]
    Timeout,

    /// No fix available (no signal, provider disabled, bad reading)
    #[error("Location unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Why a trigger ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum FailureReason {
    /// Position could not be obtained; nothing was dispatched
    #[error("No position: {0}")]
    NoPosition(PositionError),

    /// A stage exceeded its deadline
    #[error("Stage {stage} timed out")]
    StageTimeout { stage: EmergencyStage },

    /// Another trigger is still running
    #[error("An emergency trigger is already in progress")]
    AlreadyInProgress,
}

impl FailureReason {
    /// Stable label used in logs, events and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPosition(_) => "no_position",
            Self::StageTimeout { .. } => "stage_timeout",
            Self::AlreadyInProgress => "already_in_progress",
        }
    }
}

/// Result type for position acquisition
pub type PositionResult<T> = Result<T, PositionError>;
