//! Location subsystem for DocFinder.
//!
//! Resolves a partial location query (coordinates, city name, or nothing
//! at all) into a concrete search origin through an ordered fallback
//! chain: explicit coordinates, Google geocoding, IP inference.

pub mod providers;
pub mod resolver;
pub mod types;

pub use resolver::{LocationResolver, Strategy, STRATEGY_ORDER};
pub use types::{
    format_coords, Coordinate, LocationError, LocationQuery, LocationSource, ResolvedLocation,
    AREA_LABEL,
};
