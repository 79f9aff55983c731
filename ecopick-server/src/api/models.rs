//! Model listing diagnostic
//!
//! Passthrough to the provider. Uses an `ok` flag instead of the
//! `status` convention of the core handlers.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::error;

use crate::services::{ClassifierError, ModelInfo};
use crate::AppState;

#[derive(Debug, Default, Serialize)]
pub struct ListModelsResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/list-models
pub async fn list_models(State(state): State<AppState>) -> (StatusCode, Json<ListModelsResponse>) {
    match state.classifier.list_models().await {
        Ok(models) => (
            StatusCode::OK,
            Json(ListModelsResponse {
                ok: true,
                models: Some(models),
                ..Default::default()
            }),
        ),
        Err(ClassifierError::NotInitialized) => (
            StatusCode::OK,
            Json(ListModelsResponse {
                message: Some("GenAI not initialized".to_string()),
                ..Default::default()
            }),
        ),
        Err(e) => {
            error!(error = %e, "Listing models failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListModelsResponse {
                    error: Some(e.to_string()),
                    ..Default::default()
                }),
            )
        }
    }
}

pub fn model_routes() -> Router<AppState> {
    Router::new().route("/api/list-models", get(list_models))
}
