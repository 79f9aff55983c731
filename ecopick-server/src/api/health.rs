//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// `live` when a generative model is configured, else `mock`
    pub classifier: String,
    pub uptime_seconds: i64,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let classifier = if state.classifier.is_live() { "live" } else { "mock" };

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "ecopick-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        classifier: classifier.to_string(),
        uptime_seconds: (Utc::now() - state.startup_time).num_seconds(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
