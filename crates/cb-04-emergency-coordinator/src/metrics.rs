//! # Emergency Coordinator Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `emergency_triggers_total{outcome}` - Triggers by terminal outcome
//! - `emergency_trigger_duration_seconds` - Trigger wall time

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_histogram, register_int_counter_vec, Histogram, IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Triggers, labeled `completed`, `no_position`, `stage_timeout`, `already_in_progress`
    pub static ref EMERGENCY_TRIGGERS: IntCounterVec = register_int_counter_vec!(
        "emergency_triggers_total",
        "Emergency triggers by terminal outcome",
        &["outcome"]
    )
    .expect("Failed to create EMERGENCY_TRIGGERS metric");

    /// End-to-end trigger latency
    pub static ref EMERGENCY_TRIGGER_DURATION: Histogram = register_histogram!(
        "emergency_trigger_duration_seconds",
        "Time from trigger to terminal state",
        vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to create EMERGENCY_TRIGGER_DURATION metric");
}

#[cfg(feature = "metrics")]
pub fn record_trigger(outcome: &str, duration_secs: f64) {
    EMERGENCY_TRIGGERS.with_label_values(&[outcome]).inc();
    EMERGENCY_TRIGGER_DURATION.observe(duration_secs);
}

#[cfg(not(feature = "metrics"))]
pub fn record_trigger(_outcome: &str, _duration_secs: f64) {}
