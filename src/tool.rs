//! The find_doctors tool boundary.
//!
//! One callable takes the front-end's named arguments and returns a
//! tagged outcome value. Errors cross this boundary as data, never as
//! panics, and there is no partial-success shape: a call yields either
//! a rendered listing or exactly one error.

use crate::config::Config;
use crate::format::{attach_distances, render_listing, RankedResult};
use crate::location::types::{LocationError, LocationQuery, ResolvedLocation};
use crate::location::LocationResolver;
use crate::places::{NearbySearchClient, SearchError, SearchRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius assumed when the caller does not give one.
pub const DEFAULT_RADIUS_KM: u32 = 20;

fn default_radius_km() -> u32 {
    DEFAULT_RADIUS_KM
}

/// Arguments of one find_doctors invocation, as the front-end sends them.
#[derive(Debug, Clone, Deserialize)]
pub struct FindDoctorsArgs {
    pub specialty: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default = "default_radius_km")]
    pub radius_km: u32,
}

impl Default for FindDoctorsArgs {
    fn default() -> Self {
        Self {
            specialty: None,
            city: None,
            lat: None,
            lng: None,
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    LocationUnresolvable,
    UpstreamDenied,
    QuotaExceeded,
    NoResultsInRadius,
    UpstreamUnavailable,
}

/// A pipeline failure with its category and user-facing message.
#[derive(Debug)]
pub struct ToolFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolFailure {}

impl From<LocationError> for ToolFailure {
    fn from(e: LocationError) -> Self {
        Self { kind: ErrorKind::LocationUnresolvable, message: e.to_string() }
    }
}

impl From<SearchError> for ToolFailure {
    fn from(e: SearchError) -> Self {
        let kind = match &e {
            SearchError::Denied => ErrorKind::UpstreamDenied,
            SearchError::QuotaExceeded => ErrorKind::QuotaExceeded,
            SearchError::NoResults { .. } => ErrorKind::NoResultsInRadius,
            SearchError::Network(_) | SearchError::InvalidResponse(_) => {
                ErrorKind::UpstreamUnavailable
            }
        };
        Self { kind, message: e.to_string() }
    }
}

/// Everything one successful search produced.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary {
    pub location: ResolvedLocation,
    pub radius_km: u32,
    pub keyword: String,
    pub results: Vec<RankedResult>,
    pub text: String,
}

/// Run the full pipeline: resolve, search, rank, render.
pub fn run_search(config: &Config, args: &FindDoctorsArgs) -> Result<SearchSummary, ToolFailure> {
    let query = LocationQuery { city: args.city.clone(), lat: args.lat, lng: args.lng };
    let resolved = LocationResolver::new(config).resolve(&query)?;

    let request = SearchRequest::new(
        args.specialty.as_deref(),
        resolved.coordinate,
        args.radius_km,
        resolved.label.clone(),
    );
    let places = NearbySearchClient::new(config).search(&request)?;

    let results = attach_distances(places, resolved.coordinate);
    let text = render_listing(&results, args.specialty.as_deref(), &resolved.label);

    Ok(SearchSummary {
        location: resolved,
        radius_km: args.radius_km,
        keyword: request.keyword,
        results,
        text,
    })
}

/// Tagged outcome crossing the tool boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Ok { text: String },
    Error { kind: ErrorKind, message: String },
}

/// The single callable the conversational front-end invokes.
pub fn find_doctors(config: &Config, args: &FindDoctorsArgs) -> ToolOutcome {
    match run_search(config, args) {
        Ok(summary) => ToolOutcome::Ok { text: summary.text },
        Err(failure) => ToolOutcome::Error { kind: failure.kind, message: failure.message },
    }
}
