//! Google Generative Language API client
//!
//! Concrete [`GenerativeModel`] used in production. One `generateContent`
//! call per classification; no rate limiting or retry.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ClassificationRequest, ClassifierError, GenerativeModel, ModelInfo};

const USER_AGENT: &str = concat!("EcoPick/", env!("CARGO_PKG_VERSION"));

/// `generateContent` request body
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

/// `generateContent` response body
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// Gemini REST client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client; `timeout` of `None` keeps reqwest's default
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self, ClassifierError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn list_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_text = response.text().await.unwrap_or_default();
        Err(ClassifierError::Api(status.as_u16(), error_text))
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        image: &ClassificationRequest,
        prompt: &str,
    ) -> Result<String, ClassifierError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: STANDARD.encode(&image.image_bytes),
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
        };

        tracing::debug!(
            model = %self.model,
            image_bytes = image.image_bytes.len(),
            mime_type = %image.mime_type,
            "Calling generateContent"
        );

        let response = self
            .http_client
            .post(self.generate_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let parsed: GenerateResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }
        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ClassifierError> {
        let response = self
            .http_client
            .get(self.list_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let parsed: ListModelsResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        Ok(parsed.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test_key".to_string(),
            "gemini-1.5-flash".to_string(),
            base_url.to_string(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = client("https://example.test/v1beta/");
        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.list_url(), "https://example.test/v1beta/models");
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png",
                            data: STANDARD.encode([1u8, 2, 3]),
                        },
                    },
                    Part::Text { text: "classify" },
                ],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "AQID");
        assert_eq!(parts[1]["text"], "classify");
    }

    #[test]
    fn test_response_text_parts_deserialize() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "material: Glass\n"}, {"text": "confidence: 80%"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        let parts = &parsed.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.as_deref(), Some("material: Glass\n"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = client("http://127.0.0.1:9");
        let image = ClassificationRequest {
            image_bytes: vec![0xFF, 0xD8],
            mime_type: "image/jpeg".to_string(),
        };

        let err = client.generate(&image, "prompt").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Network(_)));
    }
}
