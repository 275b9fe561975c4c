//! # Facility Registry Subsystem
//!
//! Maintains the directory of care facilities used to recommend the nearest
//! hospital during an emergency.
//!
//! ## Responsibilities
//!
//! - Fetch the facility table from a remote [`FacilitySource`]
//! - Parse it tolerantly: bad rows are dropped with a warning, a broken
//!   schema fails the whole refresh
//! - Publish immutable [`FacilitySnapshot`] generations that readers can hold
//!   while a refresh is in flight
//!
//! ## Architecture
//!
//! - **Domain Layer:** table parser, snapshot types
//! - **Ports Layer:** `FacilityRegistryApi` (inbound), `FacilitySource` (outbound)
//! - **Service Layer:** `FacilityRegistryService`
//! - **Adapters Layer:** HTTP, file and in-memory sources
//!
//! ## Example
//!
//! ```rust
//! use cb_01_facility_registry::{
//!     FacilityRegistryApi, FacilityRegistryService, RegistryConfig, StaticFacilitySource,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let table = "Name,Address,Phone,Latitude,Longitude\nCity Hospital,1 Main St,108,12.97,77.59\n";
//! let registry = FacilityRegistryService::new(
//!     RegistryConfig::default(),
//!     Arc::new(StaticFacilitySource::new(table)),
//! );
//!
//! let report = registry.refresh().await.unwrap();
//! assert_eq!(report.accepted, 1);
//! assert_eq!(registry.snapshot()[0].name, "City Hospital");
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod refresh_loop;
pub mod service;

pub use adapters::{FileFacilitySource, HttpFacilitySource, StaticFacilitySource};
pub use domain::{
    parse_facility_table, FacilitySnapshot, ParsedTable, RefreshReport, RowIssue, RowWarning,
};
pub use error::{RegistryError, RegistryErrorKind, RegistryResult};
pub use ports::{FacilityRegistryApi, FacilitySource};
pub use refresh_loop::spawn_refresh_loop;
pub use service::{FacilityRegistryService, RegistryConfig, DEFAULT_FETCH_TIMEOUT};
