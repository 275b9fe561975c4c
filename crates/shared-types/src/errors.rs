//! # Error Types
//!
//! Defines validation errors for the shared value types.

use thiserror::Error;

/// Errors raised when constructing a [`Coordinate`](crate::Coordinate).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("Coordinate component is not a finite number")]
    NotFinite,

    /// Latitude outside [-90, 90].
    #[error("Latitude out of range: {0} not within [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180].
    #[error("Longitude out of range: {0} not within [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Errors raised when a recipient channel identifier is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Identifier is empty after trimming.
    #[error("Recipient identifier is empty")]
    EmptyIdentifier,

    /// Identifier contains characters that cannot appear in a phone number.
    #[error("Recipient identifier {identifier:?} contains invalid character {found:?}")]
    InvalidCharacter { identifier: String, found: char },

    /// Identifier has too few or too many digits for an E.164 number.
    #[error("Recipient identifier {identifier:?} has {digits} digits, expected 3..=15")]
    InvalidLength { identifier: String, digits: usize },
}
