//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the `FacilitySource` port for the places a facility table can
//! live: an HTTP(S) endpoint, a local file, or an in-memory script for tests.

mod file_source;
mod http_source;
mod static_source;

pub use file_source::FileFacilitySource;
pub use http_source::HttpFacilitySource;
pub use static_source::StaticFacilitySource;
