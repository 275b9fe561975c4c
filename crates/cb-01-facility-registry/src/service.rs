//! Facility Registry Service
//!
//! Owns the published snapshot and the refresh pipeline:
//! fetch (bounded by `fetch_timeout`) → parse → publish.
//!
//! ## Concurrency
//!
//! - Readers clone an `Arc<FacilitySnapshot>` under a short read lock and
//!   never wait on a fetch.
//! - Writers are serialized by `refresh_lock`, so generations are assigned in
//!   publication order and two refreshes never interleave their swaps.
//! - A failed refresh publishes nothing.

use crate::domain::{parse_facility_table, FacilitySnapshot, RefreshReport};
use crate::error::{RegistryError, RegistryResult};
use crate::metrics;
use crate::ports::inbound::FacilityRegistryApi;
use crate::ports::outbound::FacilitySource;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{BeaconEvent, EventPublisher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default upper bound on a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Registry configuration
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Upper bound on one `FacilitySource::fetch` call
    pub fetch_timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Facility Registry Service implementation
pub struct FacilityRegistryService<S: FacilitySource> {
    config: RegistryConfig,
    source: Arc<S>,
    current: RwLock<Arc<FacilitySnapshot>>,
    refresh_lock: tokio::sync::Mutex<()>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl<S: FacilitySource> FacilityRegistryService<S> {
    /// Create a registry serving the empty initial snapshot.
    pub fn new(config: RegistryConfig, source: Arc<S>) -> Self {
        Self {
            config,
            source,
            current: RwLock::new(Arc::new(FacilitySnapshot::empty())),
            refresh_lock: tokio::sync::Mutex::new(()),
            publisher: None,
        }
    }

    /// Announce refresh outcomes on the event bus.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    async fn fetch_bounded(&self) -> RegistryResult<Vec<u8>> {
        let timeout = self.config.fetch_timeout;
        match tokio::time::timeout(timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(RegistryError::unreachable(format!(
                "fetch timed out after {} ms",
                timeout.as_millis()
            ))),
        }
    }

    async fn load_and_publish(&self) -> RegistryResult<RefreshReport> {
        let _writer = self.refresh_lock.lock().await;

        let payload = self.fetch_bounded().await?;
        debug!(
            source = %self.source.describe(),
            bytes = payload.len(),
            "Fetched facility table"
        );

        let table = match parse_facility_table(&payload) {
            Ok(table) => table,
            Err(e) => {
                if let RegistryError::Empty { dropped } = &e {
                    metrics::record_rows_dropped(*dropped);
                }
                return Err(e);
            }
        };
        for warning in &table.warnings {
            warn!(line = warning.line, issue = %warning.issue, "Dropped facility row");
        }

        let generation = self.current.read().generation() + 1;
        let report = RefreshReport {
            accepted: table.records.len(),
            dropped: table.warnings.len(),
            generation,
        };
        let snapshot = Arc::new(FacilitySnapshot::new(table.records, generation));
        *self.current.write() = snapshot;

        metrics::record_rows_dropped(report.dropped);
        metrics::set_snapshot_records(report.accepted);
        Ok(report)
    }

    async fn announce(&self, event: BeaconEvent) {
        if let Some(publisher) = &self.publisher {
            publisher.publish(event).await;
        }
    }
}

#[async_trait]
impl<S: FacilitySource + 'static> FacilityRegistryApi for FacilityRegistryService<S> {
    async fn refresh(&self) -> RegistryResult<RefreshReport> {
        match self.load_and_publish().await {
            Ok(report) => {
                info!(
                    accepted = report.accepted,
                    dropped = report.dropped,
                    generation = report.generation,
                    "Facility snapshot published"
                );
                metrics::record_refresh("ok");
                self.announce(BeaconEvent::RegistryRefreshed {
                    accepted: report.accepted,
                    dropped: report.dropped,
                    generation: report.generation,
                })
                .await;
                Ok(report)
            }
            Err(e) => {
                let kind = e.kind();
                warn!(
                    kind = kind.as_str(),
                    error = %e,
                    generation = self.current.read().generation(),
                    "Facility refresh failed, keeping previous snapshot"
                );
                metrics::record_refresh(kind.as_str());
                self.announce(BeaconEvent::RegistryRefreshFailed {
                    kind: kind.as_str().to_string(),
                    reason: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    fn snapshot(&self) -> Arc<FacilitySnapshot> {
        Arc::clone(&self.current.read())
    }
}
