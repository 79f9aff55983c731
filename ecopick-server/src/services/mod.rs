//! Business services for ecopick-server
//!
//! - `classifier`: guaranteed-success wrapper around the external model
//! - `gemini_client`: production [`GenerativeModel`] implementation
//! - `ledger`: append-only in-memory submission log

pub mod classifier;
pub mod gemini_client;
pub mod ledger;

pub use classifier::{
    ClassificationRequest, ClassificationResult, ClassificationSource, Classifier,
    CLASSIFICATION_PROMPT,
};
pub use gemini_client::GeminiClient;
pub use ledger::{AggregateStats, SubmissionLedger, SubmissionRecord, SubmissionStatus};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// External model call errors
///
/// Never crosses [`Classifier::classify`]; surfaced only by the
/// model-listing diagnostic.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Generative model not initialized")]
    NotInitialized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Invalid image data: {0}")]
    InvalidImage(String),
}

/// Model listing entry as reported by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_generation_methods: Vec<String>,
}

/// Image-to-text generative capability
///
/// The single point of contact with the external classifier. Swap the
/// implementation to change providers; tests use in-process stubs.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier used for logging
    fn model_name(&self) -> &str;

    /// Submit one image plus instruction text, returning the model's text
    async fn generate(
        &self,
        image: &ClassificationRequest,
        prompt: &str,
    ) -> Result<String, ClassifierError>;

    /// Models visible to the configured credential
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_info_deserializes_provider_fields() {
        let json = r#"{
            "name": "models/gemini-1.5-flash",
            "displayName": "Gemini 1.5 Flash",
            "inputTokenLimit": 1000000,
            "supportedGenerationMethods": ["generateContent", "countTokens"]
        }"#;

        let info: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "models/gemini-1.5-flash");
        assert_eq!(info.display_name.as_deref(), Some("Gemini 1.5 Flash"));
        assert!(info.description.is_none());
        assert_eq!(info.supported_generation_methods.len(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = ClassifierError::Api(429, "quota exceeded".to_string());
        assert_eq!(err.to_string(), "API error 429: quota exceeded");
    }
}
