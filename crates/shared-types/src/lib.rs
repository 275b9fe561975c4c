//! # Shared Types Crate
//!
//! This crate contains the value types exchanged between the Care-Beacon
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Valid by Construction**: A `Coordinate` can only be built through a
//!   range-checked constructor, so downstream code never re-validates.
//! - **Immutable Values**: Records and messages are plain data; ownership of
//!   collections of them belongs to the subsystem that produced them.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
