//! Ports module for the Emergency Coordinator subsystem
//!
//! The registry and dispatcher are reached through the inbound APIs of their
//! own crates (`FacilityRegistryApi`, `AlertDispatchApi`); only the device
//! position is a port defined here.

pub mod inbound;
pub mod outbound;

pub use inbound::EmergencyApi;
pub use outbound::PositionSource;
