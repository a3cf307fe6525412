use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, info, warn};

use super::{ClassificationResult, ClassifierBackend};

/// Removes a leading `data:image/<kind>;base64,` prefix, if any.
pub fn strip_data_uri(image: &str) -> &str {
    lazy_static! {
        static ref DATA_URI_PREFIX: Regex = Regex::new(r"^data:image/\w+;base64,").unwrap();
    }
    match DATA_URI_PREFIX.find(image) {
        Some(m) => &image[m.end()..],
        None => image,
    }
}

/// Tries backends in order until one returns a structured result.
#[derive(Debug, Clone)]
pub struct VisionClassifier {
    backends: Vec<Arc<dyn ClassifierBackend>>,
}

impl VisionClassifier {
    pub fn new(backends: Vec<Arc<dyn ClassifierBackend>>) -> Self {
        Self { backends }
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Never fails: once every backend has been tried the result is
    /// [`ClassificationResult::unavailable`].
    pub async fn classify(&self, image: &str) -> ClassificationResult {
        let content = strip_data_uri(image);
        let mut previous_provider: Option<&'static str> = None;

        for backend in &self.backends {
            let provider = backend.provider_name();
            let model = backend.model_name();

            if let Some(prev) = previous_provider.filter(|p| *p != provider) {
                info!(from = prev, to = provider, "provider exhausted, falling back");
            }
            previous_provider = Some(provider);

            debug!(provider, model, "trying model");
            match backend.classify(content).await {
                Ok(result) => {
                    info!(
                        provider,
                        model,
                        is_food = result.is_food,
                        dish = result.dish_name.as_deref().unwrap_or(""),
                        "classification received"
                    );
                    return result;
                }
                Err(e) if backend.is_quota_error(&e) => {
                    warn!(provider, model, error = %e, "quota exceeded, trying next");
                }
                Err(e) => {
                    error!(provider, model, error = %e, "model failed, trying next");
                }
            }
        }

        error!(
            backends = self.backends.len(),
            "all vision providers exhausted"
        );
        ClassificationResult::unavailable()
    }
}
