//! Process configuration: the API credential and provider endpoints.
//!
//! Built once at startup and passed by reference into every collaborator.
//! A missing key is fatal before any request is served.

use std::fmt;

/// Environment variable holding the Google Maps API key.
pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DEFAULT_PLACES_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
const DEFAULT_IP_ENDPOINT: &str = "http://ip-api.com/json/";

/// Immutable process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub geocode_endpoint: String,
    pub places_endpoint: String,
    pub ip_endpoint: String,
}

impl Config {
    /// Create a configuration with the production endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_endpoint: DEFAULT_GEOCODE_ENDPOINT.to_string(),
            places_endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
            ip_endpoint: DEFAULT_IP_ENDPOINT.to_string(),
        }
    }

    /// Load the configuration from the environment.
    /// A missing or blank key is a fatal configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Override the geocoding endpoint (tests point this at a mock server).
    pub fn with_geocode_endpoint(mut self, url: impl Into<String>) -> Self {
        self.geocode_endpoint = url.into();
        self
    }

    /// Override the nearby-search endpoint.
    pub fn with_places_endpoint(mut self, url: impl Into<String>) -> Self {
        self.places_endpoint = url.into();
        self
    }

    /// Override the IP-geolocation endpoint.
    pub fn with_ip_endpoint(mut self, url: impl Into<String>) -> Self {
        self.ip_endpoint = url.into();
        self
    }
}

/// Startup configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => {
                write!(f, "Set the {} environment variable", API_KEY_VAR)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_production_endpoints() {
        let config = Config::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert!(config.geocode_endpoint.contains("maps.googleapis.com"));
        assert!(config.places_endpoint.contains("nearbysearch"));
        assert!(config.ip_endpoint.contains("ip-api.com"));
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = Config::new("k")
            .with_geocode_endpoint("http://127.0.0.1:1/geo")
            .with_places_endpoint("http://127.0.0.1:1/places")
            .with_ip_endpoint("http://127.0.0.1:1/ip");
        assert_eq!(config.geocode_endpoint, "http://127.0.0.1:1/geo");
        assert_eq!(config.places_endpoint, "http://127.0.0.1:1/places");
        assert_eq!(config.ip_endpoint, "http://127.0.0.1:1/ip");
    }

    #[test]
    fn test_missing_key_message() {
        let msg = ConfigError::MissingApiKey.to_string();
        assert!(msg.contains(API_KEY_VAR));
    }
}
