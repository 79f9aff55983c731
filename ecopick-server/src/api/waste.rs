//! Waste submission endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use ecopick_common::api::ResponseStatus;
use ecopick_common::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::SubmissionRecord;
use crate::{ApiResult, AppState};

/// `weight` may arrive as a JSON number or a numeric string (form input)
#[derive(Debug, Deserialize)]
pub struct SubmitWasteRequest {
    pub material: Option<String>,
    pub weight: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWasteResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub price_per_kg: f64,
    pub total_price: f64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionsResponse {
    pub submissions: Vec<SubmissionRecord>,
}

fn parse_weight(weight: &Value) -> Option<f64> {
    match weight {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// POST /api/submit-waste
pub async fn submit_waste(
    State(state): State<AppState>,
    payload: Result<Json<SubmitWasteRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitWasteResponse>> {
    let Json(payload) = payload?;

    let material = payload.material.unwrap_or_default();
    let weight = payload
        .weight
        .as_ref()
        .and_then(parse_weight)
        .ok_or_else(|| Error::validation("missing material or weight"))?;

    let record = state.ledger.record(&material, weight).await?;

    Ok(Json(SubmitWasteResponse {
        status: ResponseStatus::Success,
        message: "Waste data received.".to_string(),
        price_per_kg: record.price_per_kg,
        total_price: record.total_price,
    }))
}

/// GET /api/submissions
pub async fn list_submissions(State(state): State<AppState>) -> Json<SubmissionsResponse> {
    Json(SubmissionsResponse {
        submissions: state.ledger.snapshot().await,
    })
}

pub fn waste_routes() -> Router<AppState> {
    Router::new()
        .route("/api/submit-waste", post(submit_waste))
        .route("/api/submissions", get(list_submissions))
}
