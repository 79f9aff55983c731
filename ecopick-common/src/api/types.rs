//! Shared API request/response types

use serde::{Deserialize, Serialize};

/// Explicit success/error discriminant carried by every handler response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Error body returned by the core handlers
///
/// # Examples
///
/// ```
/// use ecopick_common::api::types::ErrorResponse;
///
/// let error = ErrorResponse::new("missing material or weight");
/// assert_eq!(error.message, "missing material or weight");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}

/// `GET /api/pricing` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub price_per_kg: f64,
}
