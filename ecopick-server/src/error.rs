//! Error types for ecopick-server
//!
//! Every handler failure is rendered as `{"status": "error", "message": ...}`
//! with a status code matching the cause.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecopick_common::api::ErrorResponse;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// ecopick-common error
    #[error(transparent)]
    Common(#[from] ecopick_common::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Common(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = ecopick_common::Error::validation("missing image data").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "missing image data");
    }

    #[test]
    fn test_config_error_is_internal() {
        let err: ApiError = ecopick_common::Error::Config("unreadable config".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Configuration error: unreadable config");
    }

    #[test]
    fn test_bad_request_keeps_message() {
        let err = ApiError::BadRequest("Failed to parse the request body as JSON".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Failed to parse the request body as JSON");
    }
}
