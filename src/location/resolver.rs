//! Location resolver: the ordered fallback chain.
//!
//! Explicit coordinates, then city geocoding, then IP inference. Each
//! strategy either yields a location or passes, and the chain stops at
//! the first hit. A strategy whose provider fails logs a warning and
//! passes rather than aborting the chain.

use super::providers;
use super::types::{LocationError, LocationQuery, LocationSource, ResolvedLocation, AREA_LABEL};
use crate::config::Config;

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Explicit,
    Geocode,
    IpLookup,
}

/// Resolution order. Earlier entries win.
pub const STRATEGY_ORDER: [Strategy; 3] =
    [Strategy::Explicit, Strategy::Geocode, Strategy::IpLookup];

/// The location resolver with its fallback pipeline.
pub struct LocationResolver<'a> {
    config: &'a Config,
}

impl<'a> LocationResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve a query through the full fallback chain.
    pub fn resolve(&self, query: &LocationQuery) -> Result<ResolvedLocation, LocationError> {
        for strategy in STRATEGY_ORDER {
            if let Some(resolved) = self.attempt(strategy, query) {
                return Ok(resolved);
            }
        }
        Err(LocationError::Unresolvable)
    }

    fn attempt(&self, strategy: Strategy, query: &LocationQuery) -> Option<ResolvedLocation> {
        match strategy {
            Strategy::Explicit => from_explicit(query),
            Strategy::Geocode => self.from_geocode(query),
            Strategy::IpLookup => self.from_ip(),
        }
    }

    fn from_geocode(&self, query: &LocationQuery) -> Option<ResolvedLocation> {
        let city = query.city_trimmed()?;
        match providers::geocode_city(self.config, city) {
            Ok(coordinate) => Some(ResolvedLocation {
                coordinate,
                label: city.to_string(),
                source: LocationSource::Geocoded,
            }),
            Err(e) => {
                eprintln!("  Warning: geocoding '{}' failed: {}", city, e);
                None
            }
        }
    }

    fn from_ip(&self) -> Option<ResolvedLocation> {
        match providers::ip_geolocate(self.config) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                eprintln!("  Warning: IP location detection failed: {}", e);
                None
            }
        }
    }
}

/// Explicit coordinates short-circuit the chain with no network involved.
/// A supplied city only serves as the display label here.
fn from_explicit(query: &LocationQuery) -> Option<ResolvedLocation> {
    let coordinate = query.explicit_coordinate()?;
    let label = query
        .city_trimmed()
        .map(str::to_string)
        .unwrap_or_else(|| AREA_LABEL.to_string());
    Some(ResolvedLocation {
        coordinate,
        label,
        source: LocationSource::Explicit,
    })
}
