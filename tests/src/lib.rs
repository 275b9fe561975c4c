//! # Care-Beacon Test Suite
//!
//! Cross-subsystem scenarios that no single crate can cover on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Parse and nearest-facility throughput
//! └── src/
//!     ├── fixtures.rs   # Facility tables, fake SMS relay
//!     └── integration/  # Registry → coordinator → dispatch flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cb-tests
//! cargo test -p cb-tests integration::emergency_flow
//! cargo bench -p cb-tests
//! ```

#[cfg(test)]
pub mod fixtures;
pub mod integration;
