//! Great-circle distance.

use shared_types::Coordinate;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine distance between two coordinates, in meters.
///
/// Spherical approximation; error stays below 0.5% which is irrelevant when
/// choosing between nearby facilities.
#[must_use]
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}
