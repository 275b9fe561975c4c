//! Emergency Coordinator
//!
//! Drives one trigger through `LocatingPosition → ResolvingFacility →
//! Dispatching` to `Completed` or `Failed`. Every stage runs under its own
//! deadline; only a missing position, a missed deadline or an overlapping
//! trigger ends the flow early.
//!
//! Registry problems never abort a trigger: resolution reads whatever
//! snapshot is published and an empty one just means the alert carries no
//! facility. The dispatch deadline always outlasts the dispatcher's per-send
//! timeout, so a slow recipient ends as a per-channel timeout instead of
//! failing the whole trigger.

use crate::domain::{
    compose_alert, EmergencyReport, EmergencyResult, EmergencyStage, StageEvent, StageMachine,
};
use crate::error::{FailureReason, PositionError};
use crate::metrics;
use crate::ports::inbound::EmergencyApi;
use crate::ports::outbound::PositionSource;
use async_trait::async_trait;
use cb_01_facility_registry::FacilityRegistryApi;
use cb_02_nearest_facility::resolve_with_distance;
use cb_03_alert_dispatch::AlertDispatchApi;
use parking_lot::RwLock;
use shared_bus::{BeaconEvent, EventPublisher, TriggerId};
use shared_types::{Coordinate, FacilityRecord, RecipientChannel};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Headroom added when the dispatch deadline has to be raised above the
/// dispatcher's per-send timeout.
pub const DISPATCH_GRACE: Duration = Duration::from_secs(1);

/// Coordinator configuration
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Deadline for the position fix
    pub position_timeout: Duration,
    /// Deadline for nearest-facility resolution
    pub resolve_timeout: Duration,
    /// Deadline for the whole alert fan-out; must exceed the per-send timeout
    pub dispatch_timeout: Duration,
    /// Channels alerted on every trigger
    pub recipients: Vec<RecipientChannel>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            position_timeout: Duration::from_secs(15),
            resolve_timeout: Duration::from_secs(2),
            dispatch_timeout: Duration::from_secs(30),
            recipients: Vec::new(),
        }
    }
}

/// Clears the in-flight flag however the trigger future ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Emergency Coordinator implementation
pub struct EmergencyCoordinator<R, D, P>
where
    R: FacilityRegistryApi,
    D: AlertDispatchApi,
    P: PositionSource,
{
    config: CoordinatorConfig,
    registry: Arc<R>,
    dispatcher: Arc<D>,
    positions: Arc<P>,
    dispatch_deadline: Duration,
    machine: RwLock<StageMachine>,
    in_flight: AtomicBool,
    refresh_kicked: Arc<AtomicBool>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl<R, D, P> EmergencyCoordinator<R, D, P>
where
    R: FacilityRegistryApi + 'static,
    D: AlertDispatchApi,
    P: PositionSource,
{
    pub fn new(
        config: CoordinatorConfig,
        registry: Arc<R>,
        dispatcher: Arc<D>,
        positions: Arc<P>,
    ) -> Self {
        let send_timeout = dispatcher.send_timeout();
        let dispatch_deadline = if config.dispatch_timeout > send_timeout {
            config.dispatch_timeout
        } else {
            let raised = send_timeout + DISPATCH_GRACE;
            warn!(
                dispatch_timeout_ms = config.dispatch_timeout.as_millis() as u64,
                send_timeout_ms = send_timeout.as_millis() as u64,
                raised_to_ms = raised.as_millis() as u64,
                "Dispatch deadline does not outlast a single send, raising it"
            );
            raised
        };

        Self {
            config,
            registry,
            dispatcher,
            positions,
            dispatch_deadline,
            machine: RwLock::new(StageMachine::new()),
            in_flight: AtomicBool::new(false),
            refresh_kicked: Arc::new(AtomicBool::new(false)),
            publisher: None,
        }
    }

    /// Announce stage changes and results on the event bus.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// Deadline actually applied to the dispatch stage.
    pub fn dispatch_deadline(&self) -> Duration {
        self.dispatch_deadline
    }

    async fn announce(&self, event: BeaconEvent) {
        if let Some(publisher) = &self.publisher {
            publisher.publish(event).await;
        }
    }

    async fn advance(&self, trigger_id: TriggerId, event: StageEvent) -> EmergencyStage {
        let stage = self.machine.write().process_event(event);
        debug!(%trigger_id, stage = stage.as_str(), "Emergency stage changed");
        self.announce(BeaconEvent::EmergencyStageChanged {
            trigger_id,
            stage: stage.as_str().to_string(),
        })
        .await;
        stage
    }

    async fn fail(
        &self,
        trigger_id: TriggerId,
        reason: FailureReason,
        started: Instant,
    ) -> EmergencyResult {
        self.advance(trigger_id, StageEvent::Aborted).await;
        warn!(
            %trigger_id,
            reason = reason.as_str(),
            error = %reason,
            "Emergency trigger failed"
        );
        metrics::record_trigger(reason.as_str(), started.elapsed().as_secs_f64());
        self.announce(BeaconEvent::EmergencyFailed {
            trigger_id,
            reason: reason.as_str().to_string(),
        })
        .await;
        EmergencyResult::Failed { trigger_id, reason }
    }

    /// A registry that never loaded gets a background refresh; the current
    /// trigger does not wait for it. At most one such refresh runs at a time.
    fn kick_cold_registry(&self) {
        if !self.registry.snapshot().is_initial() {
            return;
        }
        if self
            .refresh_kicked
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Background registry refresh already running");
            return;
        }

        debug!("Registry not loaded yet, refreshing in background");
        let registry = Arc::clone(&self.registry);
        let kicked = Arc::clone(&self.refresh_kicked);
        tokio::spawn(async move {
            // Outcome is logged by the registry
            let _ = registry.refresh().await;
            kicked.store(false, Ordering::SeqCst);
        });
    }

    async fn resolve_nearest(
        &self,
        origin: Coordinate,
    ) -> Result<Option<(FacilityRecord, f64)>, FailureReason> {
        let snapshot = self.registry.snapshot();
        let generation = snapshot.generation();
        let search = tokio::task::spawn_blocking(move || {
            resolve_with_distance(origin, snapshot.records())
                .map(|nearest| (nearest.facility.clone(), nearest.distance_m))
        });

        match tokio::time::timeout(self.config.resolve_timeout, search).await {
            Ok(Ok(nearest)) => {
                if nearest.is_none() {
                    warn!(generation, "No facilities available, alerting without one");
                }
                Ok(nearest)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Facility resolution task failed, alerting without one");
                Ok(None)
            }
            Err(_) => Err(FailureReason::StageTimeout {
                stage: EmergencyStage::ResolvingFacility,
            }),
        }
    }

    async fn run(&self, trigger_id: TriggerId, started: Instant) -> EmergencyResult {
        self.advance(trigger_id, StageEvent::Triggered).await;
        self.kick_cold_registry();

        let position =
            tokio::time::timeout(self.config.position_timeout, self.positions.current_position())
                .await;
        let origin = match position {
            Ok(Ok(origin)) => origin,
            Ok(Err(e)) => return self.fail(trigger_id, FailureReason::NoPosition(e), started).await,
            Err(_) => {
                let reason = FailureReason::NoPosition(PositionError::Timeout);
                return self.fail(trigger_id, reason, started).await;
            }
        };
        debug!(%trigger_id, %origin, "Position acquired");

        self.advance(trigger_id, StageEvent::PositionAcquired).await;
        let nearest = match self.resolve_nearest(origin).await {
            Ok(nearest) => nearest,
            Err(reason) => return self.fail(trigger_id, reason, started).await,
        };

        self.advance(trigger_id, StageEvent::FacilityResolved).await;
        let message = compose_alert(
            origin,
            nearest.as_ref().map(|(facility, distance)| (facility, *distance)),
        );
        let dispatch = match tokio::time::timeout(
            self.dispatch_deadline,
            self.dispatcher.dispatch(&message, &self.config.recipients),
        )
        .await
        {
            Ok(dispatch) => dispatch,
            Err(_) => {
                let reason = FailureReason::StageTimeout {
                    stage: EmergencyStage::Dispatching,
                };
                return self.fail(trigger_id, reason, started).await;
            }
        };

        self.advance(trigger_id, StageEvent::DispatchFinished).await;
        let (facility, distance_m) = match nearest {
            Some((facility, distance)) => (Some(facility), Some(distance)),
            None => (None, None),
        };
        info!(
            %trigger_id,
            facility = facility.as_ref().map(|f| f.name.as_str()).unwrap_or("none"),
            succeeded = dispatch.succeeded_count(),
            failed = dispatch.failed_count(),
            "Emergency alert dispatched"
        );
        metrics::record_trigger("completed", started.elapsed().as_secs_f64());
        self.announce(BeaconEvent::AlertDispatched {
            trigger_id,
            origin,
            facility: facility.as_ref().map(|f| f.name.clone()),
            succeeded: dispatch.succeeded_count(),
            failed: dispatch.failed_count(),
        })
        .await;

        EmergencyResult::Completed(EmergencyReport {
            trigger_id,
            origin,
            facility,
            distance_m,
            message,
            dispatch,
        })
    }
}

#[async_trait]
impl<R, D, P> EmergencyApi for EmergencyCoordinator<R, D, P>
where
    R: FacilityRegistryApi + 'static,
    D: AlertDispatchApi + 'static,
    P: PositionSource + 'static,
{
    async fn trigger_emergency(&self) -> EmergencyResult {
        let trigger_id = Uuid::new_v4();
        let started = Instant::now();

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let reason = FailureReason::AlreadyInProgress;
            warn!(%trigger_id, stage = self.stage().as_str(), "Emergency trigger rejected");
            metrics::record_trigger(reason.as_str(), 0.0);
            self.announce(BeaconEvent::EmergencyFailed {
                trigger_id,
                reason: reason.as_str().to_string(),
            })
            .await;
            return EmergencyResult::Failed { trigger_id, reason };
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!(%trigger_id, recipients = self.config.recipients.len(), "Emergency triggered");
        self.run(trigger_id, started).await
    }

    fn stage(&self) -> EmergencyStage {
        self.machine.read().stage()
    }
}
