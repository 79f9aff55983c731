//! # EcoPick Common Library
//!
//! Shared code for the EcoPick service crates:
//! - Error and result types
//! - Bootstrap configuration loading
//! - Material catalogue and pricing table
//! - API response types

pub mod api;
pub mod config;
pub mod error;
pub mod material;

pub use error::{Error, Result};
pub use material::{price_for, MaterialCategory};
