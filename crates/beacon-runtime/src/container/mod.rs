//! # Subsystem Container
//!
//! Configuration plus the concrete wiring of every subsystem onto its real
//! adapters.

pub mod config;
pub mod subsystems;

pub use config::{BeaconConfig, ConfigError};
pub use subsystems::{
    BeaconCoordinator, BeaconDispatcher, BeaconRegistry, ConfiguredSource, ContainerError,
    SubsystemContainer,
};
