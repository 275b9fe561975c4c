//! # Care-Beacon
//!
//! Emergency locate-and-alert runtime.
//!
//! ## Commands
//!
//! | Command | Does |
//! |---------|------|
//! | `refresh` | Fetch the facility directory once and report what was loaded |
//! | `nearest --lat --lon` | Rank the closest facilities to a position |
//! | `trigger --lat --lon` | Run one emergency trigger end to end |
//! | `serve --lat --lon` | Keep the registry fresh and read `sos` / `retry` / `metrics` / `quit` from stdin |
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use beacon_runtime::{BeaconConfig, BeaconRuntime, SubsystemContainer};
use beacon_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use cb_01_facility_registry::FacilityRegistryApi;
use cb_02_nearest_facility::rank_by_distance;
use cb_04_emergency_coordinator::{EmergencyApi, EmergencyReport};
use shared_bus::{EventFilter, EventSubscriber};
use shared_types::Coordinate;

/// Care-Beacon: locate the nearest hospital and alert emergency contacts
#[derive(Parser, Debug)]
#[command(name = "beacon-runtime")]
#[command(about = "Emergency locate-and-alert runtime")]
struct Args {
    /// TOML configuration file (defaults plus CB_* environment otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the facility directory once
    Refresh,

    /// List the facilities closest to a position
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Maximum number of facilities listed
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Run a single emergency trigger
    Trigger {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Long-running mode driven by stdin
    Serve {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

impl Command {
    fn position(&self) -> Result<Coordinate> {
        let (lat, lon) = match self {
            Self::Refresh => (0.0, 0.0),
            Self::Nearest { lat, lon, .. }
            | Self::Trigger { lat, lon }
            | Self::Serve { lat, lon } => (*lat, *lon),
        };
        Coordinate::new(lat, lon).context("invalid position")
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<BeaconConfig> {
    match path {
        Some(path) => BeaconConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => BeaconConfig::from_env().context("reading configuration from environment"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_telemetry(&TelemetryConfig::for_component("runtime"))
        .context("initializing telemetry")?;

    let config = load_config(args.config.as_ref())?;
    let position = args.command.position()?;
    let container =
        SubsystemContainer::new(config, position).context("building subsystem container")?;
    let runtime = BeaconRuntime::new(container);

    match args.command {
        Command::Refresh => refresh(&runtime).await,
        Command::Nearest { limit, .. } => nearest(&runtime, position, limit).await,
        Command::Trigger { .. } => trigger(&runtime).await,
        Command::Serve { .. } => serve(&runtime).await,
    }
}

async fn refresh(runtime: &BeaconRuntime) -> Result<()> {
    let report = runtime
        .container()
        .registry
        .refresh()
        .await
        .context("facility refresh failed")?;

    print_json(&report)
}

async fn nearest(runtime: &BeaconRuntime, origin: Coordinate, limit: usize) -> Result<()> {
    let registry = &runtime.container().registry;
    registry.refresh().await.context("facility refresh failed")?;

    let snapshot = registry.snapshot();
    print_json(&rank_by_distance(origin, snapshot.records(), limit))
}

async fn trigger(runtime: &BeaconRuntime) -> Result<()> {
    let container = runtime.container();
    // Alerts still go out without a directory, so a failed refresh is only logged
    if let Err(e) = container.registry.refresh().await {
        warn!(error = %e, "Sending alert without facility data");
    }

    let result = container.coordinator.trigger_emergency().await;
    print_json(&result)?;

    if let Some(reason) = result.failure() {
        bail!("emergency trigger failed: {reason}");
    }
    Ok(())
}

async fn serve(runtime: &BeaconRuntime) -> Result<()> {
    runtime.start().await;

    let mut events = runtime.container().event_bus.subscribe(EventFilter::all());
    let event_log = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            info!(topic = ?event.topic(), event = ?event, "Beacon event");
        }
    });

    info!("Ready. Commands: sos, retry, metrics, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last: Option<EmergencyReport> = None;

    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line.context("reading stdin")?,
        };
        let Some(line) = line else { break };

        match line.trim() {
            "" => {}
            "sos" => {
                let result = runtime.container().coordinator.trigger_emergency().await;
                print_json(&result)?;
                if let Some(report) = result.report() {
                    last = Some(report.clone());
                }
            }
            "retry" => match last.as_mut() {
                Some(report) if !report.dispatch.all_succeeded => {
                    report.dispatch = runtime.retry(report).await;
                    print_json(&report.dispatch)?;
                }
                Some(_) => info!("Last alert reached every recipient; nothing to retry"),
                None => warn!("No completed alert to retry"),
            },
            "metrics" => match encode_metrics() {
                Ok(text) => print!("{text}"),
                Err(e) => warn!(error = %e, "Cannot encode metrics"),
            },
            "quit" | "exit" => break,
            other => warn!(command = other, "Unknown command"),
        }
    }

    runtime.shutdown().await;
    event_log.abort();
    Ok(())
}
