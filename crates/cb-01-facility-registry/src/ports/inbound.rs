//! Driving Ports (API - Inbound)

use crate::domain::{FacilitySnapshot, RefreshReport};
use crate::error::RegistryResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Primary Facility Registry API
///
/// `snapshot` never blocks on a refresh and never fails: it returns the last
/// successfully published generation, or the empty initial snapshot.
#[async_trait]
pub trait FacilityRegistryApi: Send + Sync {
    /// Fetch, parse and publish a new snapshot.
    ///
    /// On error the published snapshot is left untouched.
    async fn refresh(&self) -> RegistryResult<RefreshReport>;

    /// Currently published snapshot.
    fn snapshot(&self) -> Arc<FacilitySnapshot>;
}
