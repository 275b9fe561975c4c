//! # Beacon Runtime Library
//!
//! Wiring and lifecycle for the Care-Beacon binary. Exposed as a library so
//! integration tests can build the same container the binary runs.

pub mod container;
pub mod runtime;

pub use container::{BeaconConfig, ConfigError, ContainerError, SubsystemContainer};
pub use runtime::BeaconRuntime;
