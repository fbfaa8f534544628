//! HTTP server exposing the search pipeline and agent manifest.

mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Config;

pub fn build_router(config: Config) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/search", get(handlers::search))
        .route("/api/tool", post(handlers::tool_call))
        .route("/api/manifest", get(handlers::manifest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, config: Config) {
    let app = build_router(config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  DocFinder server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        });
}
