use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::agent;
use crate::location::types::LocationQuery;
use crate::location::{format_coords, LocationResolver};
use crate::tool::{
    find_doctors, run_search, ErrorKind, FindDoctorsArgs, SearchSummary, ToolOutcome,
    DEFAULT_RADIUS_KM,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::LocationUnresolvable | ErrorKind::NoResultsInRadius => StatusCode::NOT_FOUND,
        ErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::UpstreamDenied | ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
    }
}

fn check_coordinates(lat: Option<f64>, lng: Option<f64>) -> Result<(), ApiError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "Latitude must be between -90 and 90",
                ));
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "Longitude must be between -180 and 180",
                ));
            }
            Ok(())
        }
        (Some(_), None) | (None, Some(_)) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "Latitude and longitude must be provided together",
        )),
        (None, None) => Ok(()),
    }
}

fn log_request(method: &str, path: &str, outcome: &str, start: Instant) {
    eprintln!(
        "[{}] {} {} -> {} ({:.1}ms)",
        Utc::now().format("%H:%M:%S"),
        method,
        path,
        outcome,
        start.elapsed().as_secs_f64() * 1000.0,
    );
}

fn join_error(e: tokio::task::JoinError) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Worker failed: {}", e))
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveParams {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    pub formatted_coords: String,
    pub source: String,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let start = Instant::now();
    check_coordinates(params.lat, params.lng)?;

    let config = state.config.clone();
    let query = LocationQuery { city: params.city, lat: params.lat, lng: params.lng };

    // The resolver does blocking HTTP; keep it off the async runtime.
    let resolved =
        tokio::task::spawn_blocking(move || LocationResolver::new(&config).resolve(&query))
            .await
            .map_err(join_error)?
            .map_err(|e| api_error(StatusCode::NOT_FOUND, e.to_string()))?;

    log_request("GET", "/api/resolve", &resolved.label, start);

    Ok(Json(ResolveResponse {
        label: resolved.label.clone(),
        lat: resolved.coordinate.lat,
        lng: resolved.coordinate.lng,
        formatted_coords: format_coords(resolved.coordinate),
        source: resolved.source.to_string(),
    }))
}

// ─── GET /api/search ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchParams {
    pub specialty: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<u32>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchSummary>, ApiError> {
    let start = Instant::now();
    check_coordinates(params.lat, params.lng)?;

    let args = FindDoctorsArgs {
        specialty: params.specialty,
        city: params.city,
        lat: params.lat,
        lng: params.lng,
        radius_km: params.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
    };

    let config = state.config.clone();
    let summary = tokio::task::spawn_blocking(move || run_search(&config, &args))
        .await
        .map_err(join_error)?
        .map_err(|failure| api_error(status_for(failure.kind), failure.message))?;

    log_request(
        "GET",
        "/api/search",
        &format!("{} results", summary.results.len()),
        start,
    );
    Ok(Json(summary))
}

// ─── POST /api/tool ──────────────────────────────────────────────

/// Tool-boundary endpoint. Pipeline errors are part of the outcome
/// payload, so this always answers 200 unless the worker itself dies.
pub async fn tool_call(
    State(state): State<Arc<AppState>>,
    Json(args): Json<FindDoctorsArgs>,
) -> Result<Json<ToolOutcome>, ApiError> {
    let start = Instant::now();

    let config = state.config.clone();
    let outcome = tokio::task::spawn_blocking(move || find_doctors(&config, &args))
        .await
        .map_err(join_error)?;

    let note = match &outcome {
        ToolOutcome::Ok { .. } => "ok",
        ToolOutcome::Error { .. } => "error",
    };
    log_request("POST", "/api/tool", note, start);
    Ok(Json(outcome))
}

// ─── GET /api/manifest ───────────────────────────────────────────

pub async fn manifest() -> Json<agent::AgentManifest> {
    Json(agent::manifest())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_supplied_coordinate_pair_is_rejected() {
        // Same rule as the CLI: a lone lat or lng is an input mistake,
        // not a cue to fall back to IP detection.
        let err = check_coordinates(Some(12.9716), None).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("together"), "got {}", err.1);

        let err = check_coordinates(None, Some(77.5946)).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("together"), "got {}", err.1);
    }

    #[test]
    fn test_complete_or_absent_coordinate_pair_is_accepted() {
        assert!(check_coordinates(Some(12.9716), Some(77.5946)).is_ok());
        assert!(check_coordinates(None, None).is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let err = check_coordinates(Some(95.0), Some(77.5946)).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("Latitude"), "got {}", err.1);

        let err = check_coordinates(Some(12.9716), Some(200.0)).unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.contains("Longitude"), "got {}", err.1);
    }
}
