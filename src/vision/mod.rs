//! Vision-model classification of food photos.
//!
//! Each [`ClassifierBackend`] is one model of one provider. The
//! [`VisionClassifier`] walks an ordered list of them and keeps the first
//! structured answer.

mod classifier;
#[cfg(test)]
pub mod fake;
mod gemini;
mod groq;
mod prompt;
mod types;

pub use classifier::VisionClassifier;
pub use gemini::GeminiBackend;
pub use groq::GroqBackend;
pub use types::{ClassificationResult, FoodType, Freshness, UNAVAILABLE_MESSAGE};

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::config::VisionConfig;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Model returned an empty response")]
    EmptyResponse,
}

#[async_trait]
pub trait ClassifierBackend: Send + Sync + fmt::Debug {
    /// Classify one base64-encoded JPEG (no data-URI prefix).
    async fn classify(&self, image_b64: &str) -> Result<ClassificationResult, VisionError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;

    /// Substrings in an error's text that mean the model's quota is spent.
    fn quota_markers(&self) -> &'static [&'static str];

    fn is_quota_error(&self, err: &VisionError) -> bool {
        let text = err.to_string();
        self.quota_markers().iter().any(|marker| text.contains(marker))
    }
}

/// Parses a model's strict-JSON reply.
pub(crate) fn parse_classification(text: &str) -> Result<ClassificationResult, VisionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(VisionError::EmptyResponse);
    }
    serde_json::from_str(text).map_err(|e| VisionError::ParseError(e.to_string()))
}

/// Builds the ordered backend list: every Gemini model, then every Groq model.
/// A provider without an API key contributes nothing.
pub fn backends_from_config(
    cfg: &VisionConfig,
) -> anyhow::Result<Vec<Arc<dyn ClassifierBackend>>> {
    let client = crate::http::client(cfg.timeout_secs)?;
    let mut backends: Vec<Arc<dyn ClassifierBackend>> = Vec::new();

    match &cfg.gemini.api_key {
        Some(key) => {
            for model in &cfg.gemini.models {
                backends.push(Arc::new(GeminiBackend::new(
                    client.clone(),
                    &cfg.gemini.base_url,
                    key,
                    model,
                )));
            }
        }
        None => warn!("GEMINI_API_KEY not set, skipping Gemini"),
    }

    match &cfg.groq.api_key {
        Some(key) => {
            for model in &cfg.groq.models {
                backends.push(Arc::new(GroqBackend::new(
                    client.clone(),
                    &cfg.groq.base_url,
                    key,
                    model,
                )));
            }
        }
        None => warn!("GROQ_API_KEY not set, skipping Groq"),
    }

    Ok(backends)
}
