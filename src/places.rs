//! Nearby doctor search against the Google Places API.

use crate::config::Config;
use crate::location::providers::{urlencode, Geometry, USER_AGENT};
use crate::location::types::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Radius ceiling imposed by the Places nearby search API.
pub const MAX_RADIUS_METERS: u64 = 50_000;
/// At most this many places are kept from one response.
pub const MAX_RESULTS: usize = 12;
/// Keyword used when the caller does not name a specialty.
pub const DEFAULT_KEYWORD: &str = "doctor";

const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

// ─── Request shaping ────────────────────────────────────────────

/// A prepared nearby search: keyword, origin, radius, display label.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub keyword: String,
    pub origin: Coordinate,
    /// Radius as requested, before the API ceiling is applied. Error
    /// messages quote this value, not the capped one.
    pub radius_km: u32,
    pub label: String,
}

impl SearchRequest {
    pub fn new(
        specialty: Option<&str>,
        origin: Coordinate,
        radius_km: u32,
        label: impl Into<String>,
    ) -> Self {
        let keyword = specialty
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_KEYWORD)
            .to_string();
        Self { keyword, origin, radius_km, label: label.into() }
    }

    /// Radius in meters, clamped to the API ceiling.
    pub fn radius_meters(&self) -> u64 {
        (u64::from(self.radius_km) * 1000).min(MAX_RADIUS_METERS)
    }
}

// ─── Results and errors ─────────────────────────────────────────

/// One place from a nearby search, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub reviews: u32,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

/// Nearby search errors.
#[derive(Debug)]
pub enum SearchError {
    /// The API rejected the key (disabled API or inactive billing).
    Denied,
    QuotaExceeded,
    NoResults { radius_km: u32, label: String },
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => write!(f, "Google Places API not enabled or billing inactive."),
            Self::QuotaExceeded => write!(f, "API quota exceeded."),
            Self::NoResults { radius_km, label } => {
                write!(f, "No doctors found within {} km of {}.", radius_km, label)
            }
            Self::Network(msg) => write!(f, "Nearby search request failed: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid nearby search response: {}", msg),
        }
    }
}

impl std::error::Error for SearchError {}

// ─── Wire payload ───────────────────────────────────────────────

#[derive(Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Deserialize)]
struct RawPlace {
    name: Option<String>,
    vicinity: Option<String>,
    rating: Option<f64>,
    #[serde(rename = "user_ratings_total")]
    reviews: Option<u32>,
    geometry: Option<Geometry>,
    opening_hours: Option<OpeningHours>,
}

#[derive(Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

impl RawPlace {
    /// Normalize a raw entry. Entries without usable geometry are dropped.
    fn into_result(self) -> Option<PlaceResult> {
        let loc = self.geometry?.location;
        let coordinate = Coordinate::new(loc.lat, loc.lng)?;
        Some(PlaceResult {
            name: self.name.unwrap_or_else(|| "Unknown".into()),
            address: self.vicinity.unwrap_or_else(|| "No address".into()),
            rating: self.rating,
            reviews: self.reviews.unwrap_or(0),
            coordinate,
            open_now: self.opening_hours.and_then(|h| h.open_now),
        })
    }
}

// ─── Search client ──────────────────────────────────────────────

/// Client for the Places nearby search endpoint.
pub struct NearbySearchClient<'a> {
    config: &'a Config,
}

impl<'a> NearbySearchClient<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run a nearby search and keep the first [`MAX_RESULTS`] usable places,
    /// in the order the API returned them.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<PlaceResult>, SearchError> {
        let url = format!(
            "{}?location={},{}&radius={}&keyword={}&key={}",
            self.config.places_endpoint,
            request.origin.lat,
            request.origin.lng,
            request.radius_meters(),
            urlencode(&request.keyword),
            urlencode(&self.config.api_key),
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .timeout(SEARCH_TIMEOUT)
            .call()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let body: PlacesResponse = response
            .into_json()
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        match body.status.as_str() {
            "REQUEST_DENIED" => return Err(SearchError::Denied),
            "OVER_QUERY_LIMIT" => return Err(SearchError::QuotaExceeded),
            _ => {}
        }

        let results: Vec<PlaceResult> = body
            .results
            .into_iter()
            .take(MAX_RESULTS)
            .filter_map(RawPlace::into_result)
            .collect();

        if results.is_empty() {
            return Err(SearchError::NoResults {
                radius_km: request.radius_km,
                label: request.label.clone(),
            });
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_config(server: &MockServer) -> Config {
        Config::new("test-key").with_places_endpoint(server.url("/nearbysearch/json"))
    }

    fn origin() -> Coordinate {
        Coordinate::new(12.9716, 77.5946).unwrap()
    }

    fn place_json(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "vicinity": "1 Main Rd",
            "rating": 4.5,
            "user_ratings_total": 120,
            "geometry": {"location": {"lat": 12.98, "lng": 77.60}},
            "opening_hours": {"open_now": true}
        })
    }

    #[test]
    fn test_radius_meters_clamping() {
        let small = SearchRequest::new(None, origin(), 20, "Bangalore");
        assert_eq!(small.radius_meters(), 20_000);

        let at_cap = SearchRequest::new(None, origin(), 50, "Bangalore");
        assert_eq!(at_cap.radius_meters(), 50_000);

        let over = SearchRequest::new(None, origin(), 200, "Bangalore");
        assert_eq!(over.radius_meters(), 50_000);
    }

    #[test]
    fn test_keyword_defaults_and_trimming() {
        assert_eq!(SearchRequest::new(None, origin(), 20, "x").keyword, "doctor");
        assert_eq!(SearchRequest::new(Some(""), origin(), 20, "x").keyword, "doctor");
        assert_eq!(SearchRequest::new(Some("   "), origin(), 20, "x").keyword, "doctor");
        assert_eq!(
            SearchRequest::new(Some("  dentist "), origin(), 20, "x").keyword,
            "dentist"
        );
    }

    #[test]
    fn test_search_sends_capped_radius_and_keyword() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/nearbysearch/json")
                .query_param("location", "12.9716,77.5946")
                .query_param("radius", "50000")
                .query_param("keyword", "doctor")
                .query_param("key", "test-key");
            then.status(200).json_body(json!({
                "status": "OK",
                "results": [place_json("City Clinic")]
            }));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 200, "Bangalore");
        let results = NearbySearchClient::new(&config).search(&request).unwrap();

        mock.assert();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "City Clinic");
    }

    #[test]
    fn test_search_request_denied() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200)
                .json_body(json!({"status": "REQUEST_DENIED", "results": []}));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let err = NearbySearchClient::new(&config).search(&request).unwrap_err();

        assert!(matches!(err, SearchError::Denied));
        assert_eq!(
            err.to_string(),
            "Google Places API not enabled or billing inactive."
        );
    }

    #[test]
    fn test_search_quota_exceeded() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200)
                .json_body(json!({"status": "OVER_QUERY_LIMIT", "results": []}));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let err = NearbySearchClient::new(&config).search(&request).unwrap_err();

        assert!(matches!(err, SearchError::QuotaExceeded));
        assert_eq!(err.to_string(), "API quota exceeded.");
    }

    #[test]
    fn test_search_caps_results_preserving_order() {
        let many: Vec<_> = (1..=20).map(|i| place_json(&format!("Clinic {}", i))).collect();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200)
                .json_body(json!({"status": "OK", "results": many}));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let results = NearbySearchClient::new(&config).search(&request).unwrap();

        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].name, "Clinic 1");
        assert_eq!(results[11].name, "Clinic 12");
    }

    #[test]
    fn test_search_no_results_quotes_requested_radius() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200)
                .json_body(json!({"status": "ZERO_RESULTS", "results": []}));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 200, "Bangalore");
        let err = NearbySearchClient::new(&config).search(&request).unwrap_err();

        assert_eq!(err.to_string(), "No doctors found within 200 km of Bangalore.");
    }

    #[test]
    fn test_search_transport_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(503);
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let err = NearbySearchClient::new(&config).search(&request).unwrap_err();

        assert!(matches!(err, SearchError::Network(_)));
        assert!(err.to_string().starts_with("Nearby search request failed:"));
    }

    #[test]
    fn test_sparse_place_gets_defaults() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200).json_body(json!({
                "status": "OK",
                "results": [
                    {"geometry": {"location": {"lat": 12.98, "lng": 77.60}}}
                ]
            }));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let results = NearbySearchClient::new(&config).search(&request).unwrap();

        let place = &results[0];
        assert_eq!(place.name, "Unknown");
        assert_eq!(place.address, "No address");
        assert_eq!(place.rating, None);
        assert_eq!(place.reviews, 0);
        assert_eq!(place.open_now, None);
    }

    #[test]
    fn test_place_without_geometry_is_dropped() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/nearbysearch/json");
            then.status(200).json_body(json!({
                "status": "OK",
                "results": [
                    {"name": "No Geometry Clinic"},
                    place_json("Usable Clinic")
                ]
            }));
        });

        let config = test_config(&server);
        let request = SearchRequest::new(None, origin(), 20, "Bangalore");
        let results = NearbySearchClient::new(&config).search(&request).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Usable Clinic");
    }
}
