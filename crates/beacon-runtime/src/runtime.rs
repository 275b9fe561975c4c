//! # Beacon Runtime
//!
//! Owns the container and the background tasks of long-running mode, and
//! stops them through a shared shutdown signal.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use cb_01_facility_registry::spawn_refresh_loop;
use cb_03_alert_dispatch::{AlertDispatchApi, DispatchResult};
use cb_04_emergency_coordinator::EmergencyReport;

use crate::container::SubsystemContainer;

/// The Care-Beacon runtime.
pub struct BeaconRuntime {
    container: Arc<SubsystemContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl BeaconRuntime {
    pub fn new(container: SubsystemContainer) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            refresh_task: Mutex::new(None),
        }
    }

    pub fn container(&self) -> &Arc<SubsystemContainer> {
        &self.container
    }

    /// Start the periodic registry refresh. The first refresh runs at once;
    /// a trigger fired before it lands still works on the empty snapshot.
    pub async fn start(&self) {
        let mut task = self.refresh_task.lock().await;
        if task.is_some() {
            warn!("Runtime already started");
            return;
        }

        let interval = self.container.config.refresh_interval();
        *task = Some(spawn_refresh_loop(
            Arc::clone(&self.container.registry),
            interval,
            self.shutdown_rx.clone(),
        ));
        info!("Care-Beacon runtime started");
    }

    /// Signal shutdown and wait for background tasks to finish.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown");
        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.refresh_task.lock().await.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Refresh task ended abnormally");
            }
        }
        info!("Care-Beacon runtime stopped");
    }

    /// Re-send the failed channels of a completed trigger with the same
    /// message. Returns the merged result.
    pub async fn retry(&self, report: &EmergencyReport) -> DispatchResult {
        self.container
            .dispatcher
            .retry_failed(&report.message, &report.dispatch)
            .await
    }
}
