//! Image classification endpoint
//!
//! `POST /api/detect` with `{"imageData": "data:<mime>;base64,<bytes>"}`.
//! Answers 200 for every image that is present, whatever the external model
//! does with it; 400 only when the image is missing.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use ecopick_common::api::ResponseStatus;
use ecopick_common::Error;
use serde::{Deserialize, Serialize};

use crate::services::{ClassificationResult, ClassificationSource};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    pub image_data: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub material: String,
    pub estimated_value: String,
    pub source: ClassificationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<ClassificationResult> for DetectResponse {
    fn from(result: ClassificationResult) -> Self {
        let message = (result.source == ClassificationSource::Live)
            .then(|| "Detection successful!".to_string());

        Self {
            status: ResponseStatus::Success,
            message,
            material: result.material,
            estimated_value: result.estimated_value,
            source: result.source,
            confidence: result.confidence_percent,
            explanation: result.explanation,
        }
    }
}

/// POST /api/detect
pub async fn detect_waste(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> ApiResult<Json<DetectResponse>> {
    let Json(payload) = payload?;

    let image_data = payload
        .image_data
        .ok_or_else(|| Error::validation("missing image data"))?;

    let result = state.classifier.classify_image_data(&image_data).await?;
    Ok(Json(result.into()))
}

pub fn detect_routes() -> Router<AppState> {
    Router::new().route("/api/detect", post(detect_waste))
}
