//! # Beacon Telemetry
//!
//! Ambient observability for the Care-Beacon runtime.
//!
//! - **Logging:** `tracing` subscriber with an `EnvFilter`, pretty or JSON
//! - **Metrics:** Prometheus text exposition of the subsystem collectors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use beacon_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_component("runtime");
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CB_SERVICE_NAME` | `care-beacon` | Service name in logs |
//! | `CB_LOG_LEVEL` / `RUST_LOG` | `info` | Level or filter directive |
//! | `CB_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CB_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::encode_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to encode Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)
}
