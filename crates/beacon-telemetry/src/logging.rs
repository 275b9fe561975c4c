//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber: an `EnvFilter` built from the
//! configured level, then either a JSON layer (containers, log shippers) or a
//! human-readable layer (development). Logs go to stderr; stdout belongs to
//! command output.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the level filter for `config`.
///
/// `RUST_LOG`-style directives such as `info,cb_03_alert_dispatch=debug` are
/// accepted as well as plain levels.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| {
        TelemetryError::Config(format!("invalid log level {:?}: {e}", config.log_level))
    })
}

/// Install the global subscriber.
///
/// # Errors
///
/// `LoggingInit` if a global subscriber is already installed, `Config` if the
/// level directive does not parse.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    if !config.console_output {
        return tracing_subscriber::registry()
            .with(filter)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()));
    }

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );
    Ok(())
}
