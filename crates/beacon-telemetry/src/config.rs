//! Telemetry configuration from environment variables.

use std::env;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full directive
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to format logs as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "care-beacon".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CB_SERVICE_NAME`: Service name (default: care-beacon)
    /// - `CB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CB_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CB_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("CB_SERVICE_NAME").unwrap_or_else(|| "care-beacon".to_string()),

            log_level: lookup("CB_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("CB_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("CB_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Configuration for one binary or component.
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("care-beacon-{component}");
        config
    }
}
