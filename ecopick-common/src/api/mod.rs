//! Shared HTTP API types
//!
//! Contains only plain serde types. The server crate wraps them with axum
//! responses.

pub mod types;

pub use types::{ErrorResponse, PriceResponse, ResponseStatus};
