//! Domain layer: distance math and nearest-neighbor selection.

pub mod haversine;
pub mod resolver;
