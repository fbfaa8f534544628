//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when a search origin has no better display name.
pub const AREA_LABEL: &str = "your area";

/// A validated geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// Format a coordinate for display, e.g. "12.9716°N, 77.5946°E".
pub fn format_coords(coordinate: Coordinate) -> String {
    let ns = if coordinate.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if coordinate.lng >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
        coordinate.lat.abs(),
        ns,
        coordinate.lng.abs(),
        ew
    )
}

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Explicit,
    Geocoded,
    IpInferred,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "Coordinates"),
            Self::Geocoded => write!(f, "Geocoding"),
            Self::IpInferred => write!(f, "IP"),
        }
    }
}

/// Partial location input supplied by the caller.
///
/// Each resolution strategy inspects the parts it understands; an absent
/// part disqualifies a strategy, it is never an error at this level.
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationQuery {
    /// Both coordinates supplied and within valid ranges.
    pub fn explicit_coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => None,
        }
    }

    /// The city string, trimmed, if it has any content.
    pub fn city_trimmed(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// A resolved search origin with display label and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub label: String,
    pub source: LocationSource,
}

impl ResolvedLocation {
    /// One-line banner for CLI output.
    pub fn display_line(&self) -> String {
        format!(
            "\u{1F4CD} {} \u{2014} {} ({})",
            self.label,
            format_coords(self.coordinate),
            self.source
        )
    }
}

/// Location resolution errors.
#[derive(Debug)]
pub enum LocationError {
    Network(String),
    InvalidResponse(String),
    NoLocation(String),
    /// Every resolution strategy was exhausted.
    Unresolvable,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::NoLocation(msg) => write!(f, "No location available: {}", msg),
            Self::Unresolvable => {
                write!(f, "Unable to detect your location. Please provide a city name.")
            }
        }
    }
}

impl std::error::Error for LocationError {}
