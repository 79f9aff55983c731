//! ecopick-server library interface
//!
//! Exposes the router and application state for the binary and for
//! integration testing.

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use ecopick_common::config::TomlConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};

use crate::services::{Classifier, GeminiClient, SubmissionLedger};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Classifier adapter (live or mock)
    pub classifier: Classifier,
    /// Process-lifetime submission log
    pub ledger: SubmissionLedger,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(classifier: Classifier, ledger: SubmissionLedger) -> Self {
        Self {
            classifier,
            ledger,
            startup_time: Utc::now(),
        }
    }
}

/// Set up the classifier from configuration
///
/// Missing key or a client that fails to build leaves the service in mock
/// mode; startup never fails here.
pub fn init_classifier(config: &TomlConfig, api_key: Option<String>) -> Classifier {
    let Some(api_key) = api_key else {
        error!("Classifier API key missing, serving mock classifications");
        return Classifier::mock();
    };

    let settings = &config.classifier;
    match GeminiClient::new(
        api_key,
        settings.model.clone(),
        settings.base_url.clone(),
        settings.timeout_secs.map(Duration::from_secs),
    ) {
        Ok(client) => {
            info!(model = %settings.model, "Generative model client initialized");
            Classifier::new(Arc::new(client))
        }
        Err(e) => {
            error!(
                error = %e,
                "Failed to initialize generative model client, serving mock classifications"
            );
            Classifier::mock()
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::detect_routes())
        .merge(api::waste_routes())
        .merge(api::pricing_routes())
        .merge(api::stats_routes())
        .merge(api::model_routes())
        .merge(api::health_routes())
        .with_state(state)
}

/// Add the transport layers configured at bootstrap
///
/// Request tracing, body size limit for image uploads, and the optional
/// static page directory as fallback route.
pub fn with_http_layers(router: Router, config: &TomlConfig) -> Router {
    let router = match &config.static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!("Static directory {} not found, static pages disabled", dir.display());
            router
        }
        None => router,
    };

    router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
