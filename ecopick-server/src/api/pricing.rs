//! Price query endpoint

use axum::{
    extract::Query,
    routing::get,
    Json, Router,
};
use ecopick_common::api::PriceResponse;
use ecopick_common::price_for;
use serde::Deserialize;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub material: Option<String>,
}

/// GET /api/pricing?material=<name>
///
/// A missing or unknown material prices at 0.
pub async fn get_pricing(Query(query): Query<PricingQuery>) -> Json<PriceResponse> {
    let material = query.material.unwrap_or_default();
    Json(PriceResponse {
        price_per_kg: price_for(&material),
    })
}

pub fn pricing_routes() -> Router<AppState> {
    Router::new().route("/api/pricing", get(get_pricing))
}
