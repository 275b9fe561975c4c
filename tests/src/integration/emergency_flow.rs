//! # Emergency Flow
//!
//! Registry, resolver, dispatcher and coordinator wired over one event bus,
//! with in-memory adapters at the edges.
//!
//! ## Flows
//!
//! 1. **SOS**: position → nearest facility → alert on every channel
//! 2. **Partial failure**: one SMS rejected, the rest delivered, retry only the failure
//! 3. **No position**: nothing is dispatched
//! 4. **Cold registry**: the first trigger kicks a background refresh

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cb_01_facility_registry::{
        FacilityRegistryApi, FacilityRegistryService, RegistryConfig, RegistryError,
        StaticFacilitySource,
    };
    use cb_03_alert_dispatch::{
        AlertDispatchApi, AlertDispatcher, DeepLinkKind, DispatchConfig, GatewayError,
        MockSmsGateway,
    };
    use cb_04_emergency_coordinator::{
        CoordinatorConfig, EmergencyApi, EmergencyCoordinator, EmergencyStage, FailureReason,
        MockPositionSource, PositionError,
    };
    use shared_bus::{BeaconEvent, EventFilter, EventSubscriber, InMemoryEventBus};
    use shared_types::{ChannelKind, Coordinate, RecipientChannel};

    use crate::fixtures::{c, TWO_FACILITIES};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    type Registry = FacilityRegistryService<StaticFacilitySource>;
    type Dispatcher = AlertDispatcher<MockSmsGateway>;
    type Coordinator = EmergencyCoordinator<Registry, Dispatcher, MockPositionSource>;

    struct Harness {
        bus: Arc<InMemoryEventBus>,
        registry: Arc<Registry>,
        gateway: Arc<MockSmsGateway>,
        dispatcher: Arc<Dispatcher>,
        positions: Arc<MockPositionSource>,
        coordinator: Coordinator,
    }

    fn recipients() -> Vec<RecipientChannel> {
        vec![
            RecipientChannel::sms("+1 555 000 0001"),
            RecipientChannel::sms("+15550000002"),
            RecipientChannel::sms("+15550000003"),
            RecipientChannel::direct_dial("108"),
            RecipientChannel::chat_deeplink("+91 98765 43210"),
        ]
    }

    fn harness(source: StaticFacilitySource, position: Coordinate) -> Harness {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(
            FacilityRegistryService::new(RegistryConfig::default(), Arc::new(source))
                .with_publisher(bus.clone()),
        );
        let gateway = Arc::new(MockSmsGateway::new());
        let dispatcher = Arc::new(AlertDispatcher::new(
            DispatchConfig::default(),
            Arc::clone(&gateway),
        ));
        let positions = Arc::new(MockPositionSource::returning(position));
        let coordinator = EmergencyCoordinator::new(
            CoordinatorConfig {
                recipients: recipients(),
                ..CoordinatorConfig::default()
            },
            Arc::clone(&registry),
            Arc::clone(&dispatcher),
            Arc::clone(&positions),
        )
        .with_publisher(bus.clone());

        Harness {
            bus,
            registry,
            gateway,
            dispatcher,
            positions,
            coordinator,
        }
    }

    // =========================================================================
    // SOS
    // =========================================================================

    #[tokio::test]
    async fn test_sos_alerts_every_channel_with_nearest_facility() {
        let h = harness(StaticFacilitySource::new(TWO_FACILITIES), c(0.0, 0.9));
        let mut sub = h.bus.subscribe(EventFilter::all());
        h.registry.refresh().await.unwrap();

        let result = h.coordinator.trigger_emergency().await;
        let report = result.report().expect("trigger completes");

        assert_eq!(report.facility.as_ref().map(|f| f.name.as_str()), Some("B"));
        let km = report.distance_m.unwrap() / 1000.0;
        assert!((km - 11.1).abs() < 0.1, "got {km} km");

        let body = &report.message.body;
        assert!(body.contains("Latitude: 0"));
        assert!(body.contains("Longitude: 0.9"));
        assert!(body.contains("Nearest hospital: B (11.1 km away)"));
        assert!(body.contains("Phone: +912000000"));

        // Every SMS carries the same body, numbers normalized
        let sent = h.gateway.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent.iter().all(|(_, text)| text == body));
        assert_eq!(h.gateway.send_count("+15550000001"), 1);

        // Deep links are handed back to the caller
        let kinds: Vec<_> = report.dispatch.actions().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![DeepLinkKind::Dial, DeepLinkKind::Chat]);
        assert!(report
            .dispatch
            .actions()
            .any(|a| a.uri.starts_with("https://wa.me/919876543210?text=")));
        assert!(report.dispatch.all_succeeded);

        // Registry and emergency events share the bus, in causal order
        let events = sub.drain();
        assert!(matches!(
            events.first(),
            Some(BeaconEvent::RegistryRefreshed { generation: 1, .. })
        ));
        assert!(matches!(
            events.last(),
            Some(BeaconEvent::AlertDispatched { succeeded: 5, failed: 0, .. })
        ));
    }

    // =========================================================================
    // PARTIAL FAILURE
    // =========================================================================

    #[tokio::test]
    async fn test_second_sms_rejected_is_reported_and_retried_alone() {
        let h = harness(StaticFacilitySource::new(TWO_FACILITIES), c(0.0, 0.1));
        h.registry.refresh().await.unwrap();
        h.gateway.fail_for(
            "+15550000002",
            GatewayError::Rejected {
                reason: "carrier refused".into(),
            },
        );

        let result = h.coordinator.trigger_emergency().await;
        assert_eq!(h.coordinator.stage(), EmergencyStage::Completed);
        let report = result.report().unwrap();
        let dispatch = &report.dispatch;

        assert!(!dispatch.all_succeeded);
        assert!(dispatch.is_partial_failure());
        assert_eq!(dispatch.outcomes.len(), 5);
        assert_eq!(dispatch.succeeded_count(), 4);
        let failed = dispatch.failed_channels();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].identifier, "+15550000002");
        assert_eq!(
            dispatch.outcomes[1].error,
            Some(GatewayError::Rejected {
                reason: "carrier refused".into()
            })
        );

        h.gateway.clear_failure("+15550000002");
        let retried = h.dispatcher.retry_failed(&report.message, dispatch).await;

        assert!(retried.all_succeeded);
        assert_eq!(h.gateway.send_count("+15550000001"), 1);
        assert_eq!(h.gateway.send_count("+15550000002"), 2);
        assert_eq!(h.gateway.send_count("+15550000003"), 1);
    }

    #[tokio::test]
    async fn test_malformed_recipient_fails_only_its_own_channel() {
        let h = harness(StaticFacilitySource::new(TWO_FACILITIES), c(0.0, 0.1));
        h.registry.refresh().await.unwrap();
        let message = cb_04_emergency_coordinator::compose_alert(c(0.0, 0.1), None);
        let channels = vec![
            RecipientChannel::sms("+15550000001"),
            RecipientChannel::sms("call me maybe"),
            RecipientChannel::new("12", ChannelKind::DirectDial),
        ];

        let result = h.dispatcher.dispatch(&message, &channels).await;

        let succeeded: Vec<_> = result.outcomes.iter().map(|o| o.succeeded).collect();
        assert_eq!(succeeded, vec![true, false, false]);
        assert!(matches!(
            result.outcomes[1].error,
            Some(GatewayError::InvalidRecipient(_))
        ));
        assert_eq!(h.gateway.total_sends(), 1);
    }

    // =========================================================================
    // NO POSITION
    // =========================================================================

    #[tokio::test]
    async fn test_permission_denied_dispatches_nothing() {
        let h = harness(StaticFacilitySource::new(TWO_FACILITIES), c(0.0, 0.0));
        h.registry.refresh().await.unwrap();
        h.positions.set_response(Err(PositionError::PermissionDenied));
        let mut sub = h.bus.subscribe(EventFilter::all());

        let result = h.coordinator.trigger_emergency().await;

        assert_eq!(
            result.failure(),
            Some(&FailureReason::NoPosition(PositionError::PermissionDenied))
        );
        assert_eq!(h.coordinator.stage(), EmergencyStage::Failed);
        assert_eq!(h.gateway.total_sends(), 0);

        let events = sub.drain();
        assert!(events
            .iter()
            .all(|e| !matches!(e, BeaconEvent::AlertDispatched { .. })));
        match events.last() {
            Some(BeaconEvent::EmergencyFailed { reason, .. }) => assert_eq!(reason, "no_position"),
            other => panic!("unexpected last event {other:?}"),
        }

        // A later trigger with a fix goes through
        h.positions.set_response(Ok(c(0.0, 0.0)));
        let result = h.coordinator.trigger_emergency().await;
        assert_eq!(
            result.report().and_then(|r| r.facility.as_ref()).map(|f| f.name.as_str()),
            Some("A")
        );
    }

    // =========================================================================
    // COLD REGISTRY
    // =========================================================================

    #[tokio::test]
    async fn test_unreachable_registry_still_alerts_without_facility() {
        let h = harness(
            StaticFacilitySource::failing(RegistryError::Unreachable {
                reason: "offline".into(),
            }),
            c(0.0, 0.5),
        );
        assert!(h.registry.refresh().await.is_err());

        let result = h.coordinator.trigger_emergency().await;
        let report = result.report().unwrap();

        assert!(report.facility.is_none());
        assert!(report.distance_m.is_none());
        assert!(!report.message.body.contains("Nearest hospital"));
        assert!(report.message.body.contains("Google Maps: "));
        assert_eq!(h.gateway.total_sends(), 3);
    }

    #[tokio::test]
    async fn test_first_trigger_warms_cold_registry() {
        let h = harness(StaticFacilitySource::new(TWO_FACILITIES), c(0.0, 0.9));
        assert!(h.registry.snapshot().is_initial());

        assert!(h.coordinator.trigger_emergency().await.is_completed());

        let registry = Arc::clone(&h.registry);
        tokio::time::timeout(Duration::from_secs(5), async move {
            while registry.snapshot().is_initial() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("background refresh publishes a snapshot");

        let result = h.coordinator.trigger_emergency().await;
        let facility = result.report().and_then(|r| r.facility.clone());
        assert_eq!(facility.map(|f| f.name), Some("B".to_string()));
    }
}
