//! # Facility Registry Metrics
//!
//! Prometheus metrics for directory refresh health.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! cb-01-facility-registry = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `registry_refreshes_total{outcome}` - Refresh attempts by outcome
//! - `registry_rows_dropped_total` - Rows dropped as parse warnings
//! - `registry_snapshot_records` - Records in the published snapshot

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Refresh attempts, labeled by outcome (`ok`, `unreachable`, `malformed`, `empty`)
    pub static ref REGISTRY_REFRESHES: IntCounterVec = register_int_counter_vec!(
        "registry_refreshes_total",
        "Facility registry refresh attempts by outcome",
        &["outcome"]
    )
    .expect("Failed to create REGISTRY_REFRESHES metric");

    /// Rows dropped during parsing
    pub static ref REGISTRY_ROWS_DROPPED: IntCounter = register_int_counter!(
        "registry_rows_dropped_total",
        "Facility rows dropped as parse warnings"
    )
    .expect("Failed to create REGISTRY_ROWS_DROPPED metric");

    /// Size of the published snapshot
    pub static ref REGISTRY_SNAPSHOT_RECORDS: IntGauge = register_int_gauge!(
        "registry_snapshot_records",
        "Records in the currently published facility snapshot"
    )
    .expect("Failed to create REGISTRY_SNAPSHOT_RECORDS metric");
}

/// Record a refresh attempt
#[cfg(feature = "metrics")]
pub fn record_refresh(outcome: &str) {
    REGISTRY_REFRESHES.with_label_values(&[outcome]).inc();
}

/// Record rows dropped by one parse
#[cfg(feature = "metrics")]
pub fn record_rows_dropped(count: usize) {
    REGISTRY_ROWS_DROPPED.inc_by(count as u64);
}

/// Update the published snapshot size
#[cfg(feature = "metrics")]
pub fn set_snapshot_records(count: usize) {
    REGISTRY_SNAPSHOT_RECORDS.set(count as i64);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_refresh(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_rows_dropped(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn set_snapshot_records(_count: usize) {}
