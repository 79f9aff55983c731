//! Common error types for EcoPick

use thiserror::Error;

/// Common result type for EcoPick operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across EcoPick crates
#[derive(Error, Debug)]
pub enum Error {
    /// Required request input missing or unusable
    #[error("{0}")]
    Validation(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// True when the error was caused by caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_bare() {
        let err = Error::validation("missing image data");
        assert_eq!(err.to_string(), "missing image data");
        assert!(err.is_validation());
    }

    #[test]
    fn test_config_error_is_not_validation() {
        let err = Error::Config("bad port".to_string());
        assert!(!err.is_validation());
        assert!(err.to_string().contains("bad port"));
    }
}
