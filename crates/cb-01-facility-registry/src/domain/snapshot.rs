//! Immutable published view of the registry

use serde::Serialize;
use shared_types::FacilityRecord;
use std::ops::Deref;
use std::time::SystemTime;

/// One published generation of the facility directory.
///
/// Snapshots are never mutated after publication; a refresh builds a new one
/// and swaps the `Arc` the registry hands out.
#[derive(Debug, Clone, Default)]
pub struct FacilitySnapshot {
    records: Vec<FacilityRecord>,
    generation: u64,
    loaded_at: Option<SystemTime>,
}

impl FacilitySnapshot {
    /// The snapshot served before any refresh has succeeded.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(records: Vec<FacilityRecord>, generation: u64) -> Self {
        Self {
            records,
            generation,
            loaded_at: Some(SystemTime::now()),
        }
    }

    /// Records in source order.
    #[must_use]
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    /// 0 for the initial empty snapshot, then 1, 2, ... per successful refresh.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wall-clock time this generation was published.
    #[must_use]
    pub fn loaded_at(&self) -> Option<SystemTime> {
        self.loaded_at
    }

    /// True until the first successful refresh.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.generation == 0
    }
}

impl Deref for FacilitySnapshot {
    type Target = [FacilityRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

/// Summary of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Rows published in the new snapshot.
    pub accepted: usize,
    /// Rows dropped as parse warnings.
    pub dropped: usize,
    /// Generation of the newly published snapshot.
    pub generation: u64,
}
