//! Error types for the Alert Dispatch subsystem

use shared_types::ChannelError;
use thiserror::Error;

/// Failure of a single recipient.
///
/// Captured in that recipient's `DispatchOutcome`; never propagated out of a
/// dispatch and never affects the other recipients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Gateway answered with a non-success status or `success: false`
    #[error("Gateway rejected message: {reason}")]
    Rejected { reason: String },

    /// No answer within the per-send timeout
    #[error("Send timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    /// Transport failure before the gateway produced an answer
    #[error("Gateway unreachable: {reason}")]
    Unreachable { reason: String },

    /// Identifier could not be normalized to a phone number
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(#[from] ChannelError),
}

impl GatewayError {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rejected { .. } => "rejected",
            Self::Timeout { .. } => "timeout",
            Self::Unreachable { .. } => "unreachable",
            Self::InvalidRecipient(_) => "invalid_recipient",
        }
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_error_converts() {
        let err: GatewayError = ChannelError::EmptyIdentifier.into();
        assert_eq!(err.kind(), "invalid_recipient");
        assert!(err.to_string().contains("empty"));
    }
}
