//! # Runtime Wiring
//!
//! The container the binary runs, built from TOML, talking to a file-backed
//! directory and a local HTTP SMS relay.

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::TcpListener as StdListener;

    use beacon_runtime::{BeaconConfig, BeaconRuntime, SubsystemContainer};
    use cb_01_facility_registry::FacilityRegistryApi;
    use cb_03_alert_dispatch::GatewayError;
    use cb_04_emergency_coordinator::EmergencyApi;
    use tempfile::NamedTempFile;

    use crate::fixtures::{c, FakeRelay, TWO_FACILITIES};

    fn directory_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TWO_FACILITIES.as_bytes()).unwrap();
        file
    }

    fn config(directory: &NamedTempFile, gateway: &str) -> BeaconConfig {
        let toml = format!(
            r#"
[registry]
source_url = "file://{}"

[dispatch]
gateway_endpoint = "{gateway}"
send_timeout_ms = 3000

[[recipients]]
identifier = "+15550000001"
kind = "sms"

[[recipients]]
identifier = "+15550000002"
kind = "sms"

[[recipients]]
identifier = "+15550000003"
kind = "sms"

[[recipients]]
identifier = "108"
kind = "direct_dial"
"#,
            directory.path().display()
        );
        BeaconConfig::parse(&toml).unwrap()
    }

    #[tokio::test]
    async fn test_trigger_through_http_relay_with_one_rejection() {
        let relay = FakeRelay::start().await;
        relay.reject("+15550000002");
        let directory = directory_file();

        let container = SubsystemContainer::new(config(&directory, &relay.url), c(0.0, 0.9))
            .unwrap();
        let runtime = BeaconRuntime::new(container);
        runtime.container().registry.refresh().await.unwrap();

        let result = runtime.container().coordinator.trigger_emergency().await;
        let report = result.report().expect("trigger completes");

        assert_eq!(report.dispatch.succeeded_count(), 3);
        assert_eq!(report.dispatch.failed_count(), 1);
        let failed = &report.dispatch.outcomes[1];
        assert_eq!(failed.channel.identifier, "+15550000002");
        assert_eq!(
            failed.error,
            Some(GatewayError::Rejected {
                reason: "number blocked".into()
            })
        );

        let received = relay.received();
        assert_eq!(received.len(), 3);
        assert!(received
            .iter()
            .all(|(_, body)| body.contains("Nearest hospital: B")));

        // Relay recovers; retry only re-sends the rejected number
        relay.accept("+15550000002");
        let retried = runtime.retry(report).await;
        assert!(retried.all_succeeded);
        let received = relay.received();
        assert_eq!(received.len(), 4);
        assert_eq!(received[3].0, "+15550000002");
    }

    #[tokio::test]
    async fn test_unreachable_relay_fails_sms_but_trigger_completes() {
        // Bind then drop to get a local port nobody listens on
        let port = StdListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let directory = directory_file();
        let endpoint = format!("http://127.0.0.1:{port}/send-sms");

        let container =
            SubsystemContainer::new(config(&directory, &endpoint), c(0.0, 0.0)).unwrap();
        container.registry.refresh().await.unwrap();

        let result = container.coordinator.trigger_emergency().await;
        let dispatch = &result.report().unwrap().dispatch;

        assert_eq!(dispatch.failed_count(), 3);
        assert!(dispatch.outcomes[..3]
            .iter()
            .all(|o| matches!(o.error, Some(GatewayError::Unreachable { .. }))));
        // The dial link needs no network
        assert!(dispatch.outcomes[3].succeeded);
        assert!(dispatch.is_partial_failure());
    }

    #[tokio::test]
    async fn test_missing_directory_file_still_alerts() {
        let relay = FakeRelay::start().await;
        let directory = directory_file();
        let mut config = config(&directory, &relay.url);
        config.registry.source_url = "file:///nonexistent/hospitals.csv".to_string();

        let container = SubsystemContainer::new(config, c(0.0, 0.0)).unwrap();
        assert!(container.registry.refresh().await.is_err());

        let result = container.coordinator.trigger_emergency().await;
        let report = result.report().unwrap();
        assert!(report.facility.is_none());
        assert!(report.dispatch.all_succeeded);
        assert_eq!(relay.received().len(), 3);
    }
}
