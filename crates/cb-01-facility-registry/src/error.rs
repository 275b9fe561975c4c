//! Error types for the Facility Registry subsystem

use thiserror::Error;

/// Coarse classification of a failed refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryErrorKind {
    Unreachable,
    Malformed,
    Empty,
}

impl RegistryErrorKind {
    /// Stable label used in logs, events and metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreachable => "unreachable",
            Self::Malformed => "malformed",
            Self::Empty => "empty",
        }
    }
}

/// Facility registry errors
///
/// None of these abort an emergency trigger: the registry keeps serving the
/// last good snapshot and the caller logs the failure as a warning.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// Transport failure, non-success status or fetch timeout
    #[error("Facility source unreachable: {reason}")]
    Unreachable { reason: String },

    /// Payload is not a table, or lacks a required column
    #[error("Facility data malformed: {reason}")]
    Malformed { reason: String },

    /// Table parsed but no row survived validation
    #[error("Facility data contained no valid rows ({dropped} dropped)")]
    Empty { dropped: usize },
}

impl RegistryError {
    #[must_use]
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::Unreachable { .. } => RegistryErrorKind::Unreachable,
            Self::Malformed { .. } => RegistryErrorKind::Malformed,
            Self::Empty { .. } => RegistryErrorKind::Empty,
        }
    }

    pub(crate) fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
