//! # Subsystem Container
//!
//! Builds the subsystems in dependency order:
//!
//! ```text
//! Registry (facility source) ──┐
//! Dispatcher (SMS gateway) ────┼──► Coordinator (position source)
//! Event bus ───────────────────┘
//! ```
//!
//! The coordinator is bound to a single position source for its lifetime.
//! Platform location services are out of scope for the runtime, so the
//! position comes from the command line.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use cb_01_facility_registry::{
    FacilityRegistryService, FacilitySource, FileFacilitySource, HttpFacilitySource,
    RegistryError, RegistryResult,
};
use cb_03_alert_dispatch::{AlertDispatcher, GatewayError, HttpSmsGateway};
use cb_04_emergency_coordinator::{EmergencyCoordinator, FixedPositionSource};
use shared_bus::{EventPublisher, InMemoryEventBus};
use shared_types::Coordinate;

use crate::container::config::{BeaconConfig, ConfigError};

/// Registry backed by the configured source.
pub type BeaconRegistry = FacilityRegistryService<ConfiguredSource>;

/// Dispatcher backed by the HTTP SMS relay.
pub type BeaconDispatcher = AlertDispatcher<HttpSmsGateway>;

/// Coordinator over the concrete registry and dispatcher.
pub type BeaconCoordinator =
    EmergencyCoordinator<BeaconRegistry, BeaconDispatcher, FixedPositionSource>;

/// Errors while assembling the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Facility source: {0}")]
    Source(#[from] RegistryError),

    #[error("SMS gateway: {0}")]
    Gateway(#[from] GatewayError),
}

/// Facility source selected by the URL scheme of `registry.source_url`.
pub enum ConfiguredSource {
    Http(HttpFacilitySource),
    File(FileFacilitySource),
}

impl ConfiguredSource {
    /// `file://` selects a local file, anything else is fetched over HTTP.
    pub fn from_url(url: &str, timeout: Duration) -> RegistryResult<Self> {
        match url.strip_prefix("file://") {
            Some(path) => Ok(Self::File(FileFacilitySource::new(PathBuf::from(path)))),
            None => Ok(Self::Http(HttpFacilitySource::new(url, timeout)?)),
        }
    }
}

#[async_trait]
impl FacilitySource for ConfiguredSource {
    async fn fetch(&self) -> RegistryResult<Vec<u8>> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Http(source) => source.describe(),
            Self::File(source) => source.describe(),
        }
    }
}

/// Central container holding all subsystem instances.
pub struct SubsystemContainer {
    pub config: BeaconConfig,

    /// Facility Registry (Subsystem 1)
    pub registry: Arc<BeaconRegistry>,

    /// Alert Dispatch (Subsystem 3)
    pub dispatcher: Arc<BeaconDispatcher>,

    /// Emergency Coordinator (Subsystem 4)
    pub coordinator: Arc<BeaconCoordinator>,

    /// Shared event bus
    pub event_bus: Arc<InMemoryEventBus>,
}

impl SubsystemContainer {
    /// Validate `config` and wire every subsystem for a user at `position`.
    pub fn new(config: BeaconConfig, position: Coordinate) -> Result<Self, ContainerError> {
        config.validate()?;

        let event_bus = Arc::new(InMemoryEventBus::new());
        let publisher: Arc<dyn EventPublisher> = event_bus.clone();

        let registry_config = config.registry_config();
        let source = ConfiguredSource::from_url(
            &config.registry.source_url,
            registry_config.fetch_timeout,
        )?;
        info!(source = %source.describe(), "Facility registry source configured");
        let registry = Arc::new(
            FacilityRegistryService::new(registry_config, Arc::new(source))
                .with_publisher(publisher.clone()),
        );

        let dispatch_config = config.dispatch_config();
        let gateway =
            HttpSmsGateway::new(&config.dispatch.gateway_endpoint, dispatch_config.send_timeout)?;
        info!(endpoint = %config.dispatch.gateway_endpoint, "SMS gateway configured");
        let dispatcher = Arc::new(AlertDispatcher::new(dispatch_config, Arc::new(gateway)));

        let coordinator = Arc::new(
            EmergencyCoordinator::new(
                config.coordinator_config(),
                Arc::clone(&registry),
                Arc::clone(&dispatcher),
                Arc::new(FixedPositionSource::new(position)),
            )
            .with_publisher(publisher),
        );

        info!(
            recipients = config.recipients.len(),
            "Subsystem container initialized"
        );

        Ok(Self {
            config,
            registry,
            dispatcher,
            coordinator,
            event_bus,
        })
    }
}
