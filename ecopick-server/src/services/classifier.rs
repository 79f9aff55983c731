//! Waste classifier adapter
//!
//! Wraps one call to the external [`GenerativeModel`] and guarantees a
//! successful result for every image that is present:
//!
//! | Situation                         | Source     | Material                    |
//! |-----------------------------------|------------|-----------------------------|
//! | No model configured at startup    | `Mock`     | `Plastic Bottle (Mock)`     |
//! | Model call succeeded              | `Live`     | verbatim model text         |
//! | Model call failed for any reason  | `Fallback` | `Plastic Bottle (Fallback)` |
//! | Image payload not decodable       | `Fallback` | `Plastic Bottle (Fallback)` |
//!
//! Live text is display text, not a validated category. Pricing it with
//! [`ecopick_common::price_for`] usually yields 0 unless the model answered
//! with a bare catalogue label.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use ecopick_common::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use super::{ClassifierError, GenerativeModel, ModelInfo};

/// Instruction sent alongside every image
pub const CLASSIFICATION_PROMPT: &str = "\
You are an expert waste classification AI.
Identify the material type in this image ONLY from these categories:

1. Plastic
2. Metal
3. Glass
4. Paper / Cardboard
5. Organic Waste
6. Electronic Waste
7. Fabric / Cloth
8. Wood
9. Iron
10. Other (explain shortly)

RULES:
- Look carefully at color, texture, transparency, shine, shape.
- Do NOT always answer Plastic.
- Be accurate.
- Output MUST be in the following format:

material: <category>
confidence: <percentage>
explanation: <reason>
";

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const MOCK_MATERIAL: &str = "Plastic Bottle (Mock)";
const FALLBACK_MATERIAL: &str = "Plastic Bottle (Fallback)";
const PLACEHOLDER_VALUE: &str = "₹5.00";
const LIVE_VALUE: &str = "₹10.00";

/// Image submitted for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
}

impl ClassificationRequest {
    pub fn new(image_bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            image_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Decode `data:<mime>;base64,<payload>` or a bare base64 string
    ///
    /// A missing MIME type defaults to `image/jpeg`. Whitespace inside the
    /// payload is ignored and padding is optional.
    pub fn from_data_url(image_data: &str) -> std::result::Result<Self, ClassifierError> {
        let url = DataUrl::split(image_data)?;
        let compact: String = url
            .payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let image_bytes = PAYLOAD_ENGINE
            .decode(compact)
            .map_err(|e| ClassifierError::InvalidImage(e.to_string()))?;

        Ok(Self::new(image_bytes, url.mime_type))
    }
}

/// Standard alphabet, padding optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// `imageData` as posted, split but not yet decoded
#[derive(Debug, Clone, Copy)]
struct DataUrl<'a> {
    mime_type: &'a str,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    fn split(image_data: &'a str) -> std::result::Result<Self, ClassifierError> {
        let image_data = image_data.trim();
        let Some(rest) = image_data.strip_prefix("data:") else {
            return Ok(Self {
                mime_type: DEFAULT_MIME_TYPE,
                payload: image_data,
            });
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ClassifierError::InvalidImage("malformed data URL".to_string()))?;
        let mime = header.split(';').next().unwrap_or_default().trim();

        Ok(Self {
            mime_type: if mime.is_empty() { DEFAULT_MIME_TYPE } else { mime },
            payload: payload.trim(),
        })
    }
}

/// True when the posted field carries no image at all
///
/// A malformed data URL still counts as present.
fn is_missing(image_data: &str) -> bool {
    match DataUrl::split(image_data) {
        Ok(url) => url.payload.is_empty(),
        Err(_) => false,
    }
}

/// Provenance of a classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Live,
    Fallback,
    Mock,
}

/// Outcome returned to the caller; never persisted
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub material: String,
    pub confidence_percent: Option<f64>,
    pub explanation: Option<String>,
    pub source: ClassificationSource,
    /// Display price string, not derived from the pricing table
    pub estimated_value: String,
}

impl ClassificationResult {
    fn placeholder(material: &str, source: ClassificationSource) -> Self {
        Self {
            material: material.to_string(),
            confidence_percent: None,
            explanation: None,
            source,
            estimated_value: PLACEHOLDER_VALUE.to_string(),
        }
    }

    pub fn mock() -> Self {
        Self::placeholder(MOCK_MATERIAL, ClassificationSource::Mock)
    }

    pub fn fallback() -> Self {
        Self::placeholder(FALLBACK_MATERIAL, ClassificationSource::Fallback)
    }

    fn live(text: String) -> Self {
        let (confidence_percent, explanation) = parse_answer(&text);
        Self {
            material: text,
            confidence_percent,
            explanation,
            source: ClassificationSource::Live,
            estimated_value: LIVE_VALUE.to_string(),
        }
    }
}

/// Best-effort read of the `confidence:` and `explanation:` lines
fn parse_answer(text: &str) -> (Option<f64>, Option<String>) {
    let mut confidence = None;
    let mut explanation = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().trim_matches('*').trim().to_ascii_lowercase();
        let value = value.trim().trim_matches('*').trim();

        match key.as_str() {
            "confidence" if confidence.is_none() => {
                confidence = value.trim_end_matches('%').trim().parse::<f64>().ok();
            }
            "explanation" if explanation.is_none() && !value.is_empty() => {
                explanation = Some(value.to_string());
            }
            _ => {}
        }
    }

    (confidence, explanation)
}

/// Classifier adapter
///
/// `model` is `None` when the external capability could not be set up at
/// startup; every classification is then answered with the mock result.
#[derive(Clone)]
pub struct Classifier {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl Classifier {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Adapter with no external capability
    pub fn mock() -> Self {
        Self { model: None }
    }

    pub fn is_live(&self) -> bool {
        self.model.is_some()
    }

    /// Classify the raw `imageData` field of a detect request
    ///
    /// Only an absent payload is an error. Mock mode answers before looking
    /// at the image; in live mode a payload that does not decode is treated
    /// like any other external failure.
    pub async fn classify_image_data(&self, image_data: &str) -> Result<ClassificationResult> {
        if is_missing(image_data) {
            return Err(Error::validation("missing image data"));
        }

        let Some(model) = &self.model else {
            return Ok(ClassificationResult::mock());
        };

        match ClassificationRequest::from_data_url(image_data) {
            Ok(request) => self.classify(&request).await,
            Err(e) => {
                error!(
                    model = model.model_name(),
                    error = %e,
                    "Image data not decodable, returning fallback"
                );
                Ok(ClassificationResult::fallback())
            }
        }
    }

    /// Classify one image
    ///
    /// Fails only for an empty payload. External failures are logged and
    /// converted to the fallback result.
    pub async fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult> {
        if request.image_bytes.is_empty() {
            return Err(Error::validation("missing image data"));
        }

        let Some(model) = &self.model else {
            return Ok(ClassificationResult::mock());
        };

        match model.generate(request, CLASSIFICATION_PROMPT).await {
            Ok(text) => {
                info!(
                    model = model.model_name(),
                    image_bytes = request.image_bytes.len(),
                    "Classification successful"
                );
                Ok(ClassificationResult::live(text))
            }
            Err(e) => {
                error!(
                    model = model.model_name(),
                    error = %e,
                    "Classification failed, returning fallback"
                );
                Ok(ClassificationResult::fallback())
            }
        }
    }

    /// Diagnostic passthrough to the provider's model listing
    pub async fn list_models(&self) -> std::result::Result<Vec<ModelInfo>, ClassifierError> {
        match &self.model {
            Some(model) => model.list_models().await,
            None => Err(ClassifierError::NotInitialized),
        }
    }
}
