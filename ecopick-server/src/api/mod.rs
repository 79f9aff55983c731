//! HTTP API handlers for ecopick-server

pub mod detect;
pub mod health;
pub mod models;
pub mod pricing;
pub mod stats;
pub mod waste;

pub use detect::{detect_routes, detect_waste};
pub use health::health_routes;
pub use models::{list_models, model_routes};
pub use pricing::{get_pricing, pricing_routes};
pub use stats::{get_stats, stats_routes};
pub use waste::{list_submissions, submit_waste, waste_routes};

use axum::extract::rejection::JsonRejection;

use crate::ApiError;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
