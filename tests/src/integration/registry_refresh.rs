//! # Registry Refresh
//!
//! Snapshot publication as seen by readers: resolution keeps working through
//! failed refreshes, readers never observe a half-built table, and the
//! background loop keeps generations coming.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cb_01_facility_registry::{
        spawn_refresh_loop, FacilityRegistryApi, FacilityRegistryService, RegistryConfig,
        RegistryError, RegistryErrorKind, StaticFacilitySource,
    };
    use cb_02_nearest_facility::{rank_by_distance, resolve};
    use shared_bus::{BeaconEvent, EventFilter, EventSubscriber, EventTopic, InMemoryEventBus};
    use tokio::sync::watch;

    use crate::fixtures::{c, THREE_FACILITIES, TWO_FACILITIES};

    type Registry = FacilityRegistryService<StaticFacilitySource>;

    fn registry(source: StaticFacilitySource, bus: &Arc<InMemoryEventBus>) -> Arc<Registry> {
        Arc::new(
            FacilityRegistryService::new(RegistryConfig::default(), Arc::new(source))
                .with_publisher(bus.clone()),
        )
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_resolving_against_last_snapshot() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::FacilityRegistry]));
        let registry = registry(
            StaticFacilitySource::scripted(vec![
                Ok(TWO_FACILITIES.as_bytes().to_vec()),
                Err(RegistryError::Unreachable {
                    reason: "502 Bad Gateway".into(),
                }),
                Ok(b"<html>maintenance</html>".to_vec()),
            ]),
            &bus,
        );

        registry.refresh().await.unwrap();
        let before = registry.snapshot();

        let err = registry.refresh().await.unwrap_err();
        assert_eq!(err.kind(), RegistryErrorKind::Unreachable);
        let err = registry.refresh().await.unwrap_err();
        assert_eq!(err.kind(), RegistryErrorKind::Malformed);

        let after = registry.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.generation(), 1);
        assert_eq!(
            resolve(c(0.0, 0.9), after.records()).map(|f| f.name.as_str()),
            Some("B")
        );

        let kinds: Vec<_> = sub
            .drain()
            .into_iter()
            .map(|e| match e {
                BeaconEvent::RegistryRefreshed { .. } => "refreshed".to_string(),
                BeaconEvent::RegistryRefreshFailed { kind, .. } => kind,
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(kinds, vec!["refreshed", "unreachable", "malformed"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readers_see_old_generation_until_swap() {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = registry(
            StaticFacilitySource::scripted(vec![
                Ok(TWO_FACILITIES.as_bytes().to_vec()),
                Ok(THREE_FACILITIES.as_bytes().to_vec()),
            ])
            .with_delay(Duration::from_secs(3)),
            &bus,
        );
        registry.refresh().await.unwrap();

        let refreshing = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.refresh().await })
        };
        tokio::task::yield_now().await;

        // Fetch is still sleeping: the published table is the old one, whole
        let during = registry.snapshot();
        assert_eq!(during.generation(), 1);
        assert_eq!(during.len(), 2);

        let report = refreshing.await.unwrap().unwrap();
        assert_eq!(report.generation, 2);

        let after = registry.snapshot();
        assert_eq!(after.len(), 3);
        // The reader's handle still points at its own generation
        assert_eq!(during.len(), 2);

        let ranked = rank_by_distance(c(0.0, 179.0), after.records(), 1);
        assert_eq!(ranked[0].facility.name, "C");
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_publishes_successive_generations() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::FacilityRegistry]));
        let registry = registry(StaticFacilitySource::new(TWO_FACILITIES), &bus);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_refresh_loop(
            Arc::clone(&registry),
            Duration::from_secs(3600),
            shutdown_rx,
        );

        for expected in 1..=3u64 {
            match sub.recv().await {
                Some(BeaconEvent::RegistryRefreshed { generation, .. }) => {
                    assert_eq!(generation, expected)
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(registry.snapshot().generation(), 3);

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
