//! # cb-02-nearest-facility
//!
//! Resolves the care facility closest to a coordinate.
//!
//! ## Overview
//!
//! - **Haversine distance** on a spherical Earth (mean radius 6 371 008.8 m)
//! - **Strict minimum** with a stable tie-break: on equal distance the record
//!   that appears first in the input wins
//! - **Empty input is not an error**: `resolve` returns `None`
//!
//! Everything here is pure and synchronous, so it can be called from any
//! context, including concurrently, with a borrowed view of the registry
//! snapshot.
//!
//! ## Example
//!
//! ```rust
//! use cb_02_nearest_facility::resolve;
//! use shared_types::{Coordinate, FacilityRecord};
//!
//! let facilities = vec![
//!     FacilityRecord::new("A", Coordinate::new(0.0, 0.0).unwrap()),
//!     FacilityRecord::new("B", Coordinate::new(0.0, 1.0).unwrap()),
//! ];
//! let origin = Coordinate::new(0.0, 0.9).unwrap();
//!
//! assert_eq!(resolve(origin, &facilities).map(|f| f.name.as_str()), Some("B"));
//! ```

pub mod domain;

pub use domain::haversine::{haversine_distance_m, EARTH_RADIUS_M};
pub use domain::resolver::{
    rank_by_distance, resolve, resolve_with_distance, NearestFacility, RankedFacility,
};
