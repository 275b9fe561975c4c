//! Nearest-neighbor selection over a facility snapshot.
//!
//! INVARIANT: ties on distance resolve to the earliest record in input order.
//! Selection only replaces the current best on a strictly smaller distance,
//! and ranking uses a stable sort, so both paths honor it.

use crate::domain::haversine::haversine_distance_m;
use serde::Serialize;
use shared_types::{Coordinate, FacilityRecord};

/// The closest facility together with its distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestFacility<'a> {
    pub facility: &'a FacilityRecord,
    pub distance_m: f64,
}

/// One entry of a distance ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedFacility<'a> {
    /// Position of the record in the input slice.
    pub index: usize,
    pub facility: &'a FacilityRecord,
    pub distance_m: f64,
}

/// Return the facility closest to `origin`, or `None` for an empty slice.
#[must_use]
pub fn resolve(origin: Coordinate, facilities: &[FacilityRecord]) -> Option<&FacilityRecord> {
    resolve_with_distance(origin, facilities).map(|nearest| nearest.facility)
}

/// Like [`resolve`] but also reports the distance in meters.
#[must_use]
pub fn resolve_with_distance(
    origin: Coordinate,
    facilities: &[FacilityRecord],
) -> Option<NearestFacility<'_>> {
    let mut best: Option<NearestFacility<'_>> = None;

    for facility in facilities {
        let distance_m = haversine_distance_m(origin, facility.location);
        let closer = match &best {
            None => true,
            Some(current) => distance_m < current.distance_m,
        };
        if closer {
            best = Some(NearestFacility {
                facility,
                distance_m,
            });
        }
    }

    best
}

/// Rank facilities by ascending distance from `origin`, keeping at most `limit`.
///
/// Equal distances keep their input order.
#[must_use]
pub fn rank_by_distance(
    origin: Coordinate,
    facilities: &[FacilityRecord],
    limit: usize,
) -> Vec<RankedFacility<'_>> {
    let mut ranked: Vec<RankedFacility<'_>> = facilities
        .iter()
        .enumerate()
        .map(|(index, facility)| RankedFacility {
            index,
            facility,
            distance_m: haversine_distance_m(origin, facility.location),
        })
        .collect();

    // Distances are finite (coordinates are validated), so total_cmp matches <
    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked.truncate(limit);
    ranked
}
