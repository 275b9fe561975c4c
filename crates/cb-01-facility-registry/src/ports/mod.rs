//! Ports module for the Facility Registry subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::FacilityRegistryApi;
pub use outbound::FacilitySource;
