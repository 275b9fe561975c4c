//! # Alert Dispatch Metrics
//!
//! Enable with the `metrics` feature.
//!
//! - `alert_sms_sends_total{outcome}` - Gateway calls by outcome
//! - `alert_dispatches_total{result}` - Dispatches by aggregate result

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Gateway calls, labeled `ok`, `rejected`, `timeout`, `unreachable`
    pub static ref ALERT_SMS_SENDS: IntCounterVec = register_int_counter_vec!(
        "alert_sms_sends_total",
        "SMS gateway calls by outcome",
        &["outcome"]
    )
    .expect("Failed to create ALERT_SMS_SENDS metric");

    /// Dispatches, labeled `complete` or `partial`
    pub static ref ALERT_DISPATCHES: IntCounterVec = register_int_counter_vec!(
        "alert_dispatches_total",
        "Alert dispatches by aggregate result",
        &["result"]
    )
    .expect("Failed to create ALERT_DISPATCHES metric");
}

#[cfg(feature = "metrics")]
pub fn record_send(outcome: &str) {
    ALERT_SMS_SENDS.with_label_values(&[outcome]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_dispatch(all_succeeded: bool) {
    let label = if all_succeeded { "complete" } else { "partial" };
    ALERT_DISPATCHES.with_label_values(&[label]).inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_send(_outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_dispatch(_all_succeeded: bool) {}
