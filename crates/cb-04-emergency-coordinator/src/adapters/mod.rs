//! # Adapters Layer (Hexagonal Architecture)
//!
//! `PositionSource` implementations. Real device geolocation lives in the
//! presentation layer; the runtime feeds a known coordinate instead.

mod fixed_position;
mod mock_position;

pub use fixed_position::FixedPositionSource;
pub use mock_position::MockPositionSource;
