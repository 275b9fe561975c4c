//! # Emergency Coordinator Subsystem
//!
//! Turns one SOS action into a definitive outcome:
//!
//! 1. **LocatingPosition** - ask the [`PositionSource`] for a fix
//! 2. **ResolvingFacility** - pick the nearest facility from the published
//!    registry snapshot (an empty snapshot is not fatal)
//! 3. **Dispatching** - compose the alert and fan it out to the configured
//!    recipients
//!
//! The trigger ends in [`EmergencyResult::Completed`] (carrying the
//! per-recipient outcomes, which may include failures) or
//! [`EmergencyResult::Failed`] with a [`FailureReason`].
//!
//! ## Architecture
//!
//! - **Domain Layer:** stage machine, alert composition, result types
//! - **Ports Layer:** `EmergencyApi` (inbound), `PositionSource` (outbound);
//!   the registry and dispatcher are consumed through their own crates' APIs
//! - **Service Layer:** `EmergencyCoordinator`
//! - **Adapters Layer:** fixed and scripted position sources

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{FixedPositionSource, MockPositionSource};
pub use domain::{
    compose_alert, EmergencyReport, EmergencyResult, EmergencyStage, StageEvent, StageMachine,
};
pub use error::{FailureReason, PositionError, PositionResult};
pub use ports::{EmergencyApi, PositionSource};
pub use service::{CoordinatorConfig, EmergencyCoordinator, DISPATCH_GRACE};
