//! Background refresh task.

use crate::ports::inbound::FacilityRegistryApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Refresh `registry` every `interval` until `shutdown` flips to `true` or
/// its sender is dropped.
///
/// The first refresh runs immediately. Failures are already logged by the
/// registry and never stop the loop.
pub fn spawn_refresh_loop<R>(
    registry: Arc<R>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    R: FacilityRegistryApi + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = interval.as_secs(), "Facility refresh loop started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Ok(report) = registry.refresh().await {
                        debug!(generation = report.generation, "Scheduled refresh complete");
                    }
                }
            }
        }

        info!("Facility refresh loop stopped");
    })
}
