//! # Beacon Configuration
//!
//! Loaded from a TOML file, then overridden from the environment:
//!
//! ```toml
//! [registry]
//! source_url = "https://example.org/hospitals.csv"
//! fetch_timeout_ms = 10000
//! refresh_interval_secs = 3600
//!
//! [dispatch]
//! gateway_endpoint = "http://127.0.0.1:3000/send-sms"
//! send_timeout_ms = 10000
//!
//! [coordinator]
//! position_timeout_ms = 15000
//! resolve_timeout_ms = 2000
//! dispatch_timeout_ms = 30000
//!
//! [[recipients]]
//! identifier = "+15550000001"
//! kind = "sms"
//!
//! [[recipients]]
//! identifier = "108"
//! kind = "direct_dial"
//! ```
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `CB_REGISTRY_URL` | `registry.source_url` |
//! | `CB_FETCH_TIMEOUT_MS` | `registry.fetch_timeout_ms` |
//! | `CB_GATEWAY_ENDPOINT` | `dispatch.gateway_endpoint` |
//! | `CB_SEND_TIMEOUT_MS` | `dispatch.send_timeout_ms` |

use cb_01_facility_registry::RegistryConfig;
use cb_03_alert_dispatch::DispatchConfig;
use cb_04_emergency_coordinator::CoordinatorConfig;
use serde::Deserialize;
use shared_types::RecipientChannel;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config file {path}: {error}")]
    Io { path: String, error: String },

    /// Config file is not valid TOML for this schema.
    #[error("Invalid config file: {0}")]
    Parse(String),

    /// Environment override is not a number.
    #[error("Environment variable {key}={value:?} is not a valid number")]
    InvalidEnv { key: &'static str, value: String },

    /// No recipient channels configured.
    #[error("At least one [[recipients]] entry is required")]
    NoRecipients,

    /// URL with an unsupported scheme.
    #[error("{key} must be an http(s) URL{extra}, got {value:?}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        extra: &'static str,
    },

    /// Timeout or interval set to zero.
    #[error("{key} must be greater than zero")]
    ZeroDuration { key: &'static str },

    /// Whole-dispatch deadline would expire before a single send can.
    #[error(
        "coordinator.dispatch_timeout_ms ({dispatch_ms}) must exceed dispatch.send_timeout_ms ({send_ms})"
    )]
    DispatchDeadlineTooShort { dispatch_ms: u64, send_ms: u64 },
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    pub registry: RegistrySection,
    pub dispatch: DispatchSection,
    pub coordinator: CoordinatorSection,
    pub recipients: Vec<RecipientChannel>,
}

/// `[registry]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    /// `http(s)://` or `file://` location of the facility CSV.
    pub source_url: String,
    pub fetch_timeout_ms: u64,
    /// Background refresh period for long-running mode.
    pub refresh_interval_secs: u64,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            source_url: "http://127.0.0.1:3000/hospitals.csv".to_string(),
            fetch_timeout_ms: 10_000,
            refresh_interval_secs: 3_600,
        }
    }
}

/// `[dispatch]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchSection {
    pub gateway_endpoint: String,
    pub send_timeout_ms: u64,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            gateway_endpoint: "http://127.0.0.1:3000/send-sms".to_string(),
            send_timeout_ms: 10_000,
        }
    }
}

/// `[coordinator]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CoordinatorSection {
    pub position_timeout_ms: u64,
    pub resolve_timeout_ms: u64,
    pub dispatch_timeout_ms: u64,
}

impl Default for CoordinatorSection {
    fn default() -> Self {
        Self {
            position_timeout_ms: 15_000,
            resolve_timeout_ms: 2_000,
            dispatch_timeout_ms: 30_000,
        }
    }
}

impl BeaconConfig {
    /// Load from `path` and apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `CB_*` overrides read through `lookup`.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("CB_REGISTRY_URL") {
            self.registry.source_url = url;
        }
        if let Some(endpoint) = lookup("CB_GATEWAY_ENDPOINT") {
            self.dispatch.gateway_endpoint = endpoint;
        }
        if let Some(value) = lookup("CB_FETCH_TIMEOUT_MS") {
            self.registry.fetch_timeout_ms = parse_millis("CB_FETCH_TIMEOUT_MS", value)?;
        }
        if let Some(value) = lookup("CB_SEND_TIMEOUT_MS") {
            self.dispatch.send_timeout_ms = parse_millis("CB_SEND_TIMEOUT_MS", value)?;
        }
        Ok(())
    }

    /// Check the configuration is usable for an emergency trigger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recipients.is_empty() {
            return Err(ConfigError::NoRecipients);
        }

        let source = &self.registry.source_url;
        if !(is_http(source) || source.starts_with("file://")) {
            return Err(ConfigError::InvalidUrl {
                key: "registry.source_url",
                value: source.clone(),
                extra: " or file:// path",
            });
        }
        if !is_http(&self.dispatch.gateway_endpoint) {
            return Err(ConfigError::InvalidUrl {
                key: "dispatch.gateway_endpoint",
                value: self.dispatch.gateway_endpoint.clone(),
                extra: "",
            });
        }

        let durations = [
            ("registry.fetch_timeout_ms", self.registry.fetch_timeout_ms),
            ("registry.refresh_interval_secs", self.registry.refresh_interval_secs),
            ("dispatch.send_timeout_ms", self.dispatch.send_timeout_ms),
            ("coordinator.position_timeout_ms", self.coordinator.position_timeout_ms),
            ("coordinator.resolve_timeout_ms", self.coordinator.resolve_timeout_ms),
            ("coordinator.dispatch_timeout_ms", self.coordinator.dispatch_timeout_ms),
        ];
        if let Some((key, _)) = durations.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroDuration { key: *key });
        }
        if self.coordinator.dispatch_timeout_ms <= self.dispatch.send_timeout_ms {
            return Err(ConfigError::DispatchDeadlineTooShort {
                dispatch_ms: self.coordinator.dispatch_timeout_ms,
                send_ms: self.dispatch.send_timeout_ms,
            });
        }

        Ok(())
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            fetch_timeout: Duration::from_millis(self.registry.fetch_timeout_ms),
        }
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            send_timeout: Duration::from_millis(self.dispatch.send_timeout_ms),
        }
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            position_timeout: Duration::from_millis(self.coordinator.position_timeout_ms),
            resolve_timeout: Duration::from_millis(self.coordinator.resolve_timeout_ms),
            dispatch_timeout: Duration::from_millis(self.coordinator.dispatch_timeout_ms),
            recipients: self.recipients.clone(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.registry.refresh_interval_secs)
    }
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn parse_millis(key: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
