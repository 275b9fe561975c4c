//! Ports module for the Alert Dispatch subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::AlertDispatchApi;
pub use outbound::SmsGateway;
