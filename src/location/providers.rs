//! Location providers: Google Geocoding and IP-based lookup.

use super::types::{Coordinate, LocationError, LocationSource, ResolvedLocation};
use crate::config::Config;
use serde::Deserialize;
use std::time::Duration;

pub(crate) const USER_AGENT: &str = "DocFinder/0.3 (nearby-doctor-search)";

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);
const IP_TIMEOUT: Duration = Duration::from_secs(8);

// ─── Geocoding provider ─────────────────────────────────────────

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

/// Geometry block shared by the geocoding and places payloads.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Geometry {
    pub(crate) location: LatLng,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

/// Resolve a city name to coordinates via the Google Geocoding API.
pub fn geocode_city(config: &Config, city: &str) -> Result<Coordinate, LocationError> {
    let url = format!(
        "{}?address={}&key={}",
        config.geocode_endpoint,
        urlencode(city),
        urlencode(&config.api_key),
    );

    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(GEOCODE_TIMEOUT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let body: GeocodeResponse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    if body.status != "OK" {
        return Err(LocationError::NoLocation(format!(
            "geocoding status '{}'",
            body.status
        )));
    }

    let first = body.results.first().ok_or_else(|| {
        LocationError::NoLocation(format!("no geocoding results for '{}'", city))
    })?;

    let loc = &first.geometry.location;
    Coordinate::new(loc.lat, loc.lng).ok_or_else(|| {
        LocationError::InvalidResponse(format!(
            "geocoded coordinate out of range: {}, {}",
            loc.lat, loc.lng
        ))
    })
}

// ─── IP-based geolocation ───────────────────────────────────────

#[derive(Deserialize)]
struct IpApiResponse {
    status: String,
    city: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Auto-detect the caller's location from their public IP.
pub fn ip_geolocate(config: &Config) -> Result<ResolvedLocation, LocationError> {
    let response = ureq::get(&config.ip_endpoint)
        .set("User-Agent", USER_AGENT)
        .timeout(IP_TIMEOUT)
        .call()
        .map_err(|e| LocationError::Network(e.to_string()))?;

    let r: IpApiResponse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    if r.status != "success" {
        return Err(LocationError::NoLocation(format!(
            "IP lookup status '{}'",
            r.status
        )));
    }

    let lat = r.lat.ok_or_else(|| LocationError::InvalidResponse("no latitude".into()))?;
    let lon = r.lon.ok_or_else(|| LocationError::InvalidResponse("no longitude".into()))?;
    let coordinate = Coordinate::new(lat, lon).ok_or_else(|| {
        LocationError::InvalidResponse(format!("coordinate out of range: {}, {}", lat, lon))
    })?;

    let city = r
        .city
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "Unknown".into());
    let label = match r.country_code.as_deref().filter(|cc| !cc.is_empty()) {
        Some(cc) => format!("{}, {}", city, cc),
        None => city,
    };

    Ok(ResolvedLocation {
        coordinate,
        label,
        source: LocationSource::IpInferred,
    })
}

// ─── URL encoding (minimal, no extra dep) ───────────────────────

/// Percent-encode a query value, byte by byte, so multi-byte UTF-8
/// characters come out as their full escape sequence.
pub(crate) fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
