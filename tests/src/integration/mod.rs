//! Cross-subsystem integration tests.

pub mod emergency_flow;
pub mod registry_refresh;
pub mod runtime_wiring;
