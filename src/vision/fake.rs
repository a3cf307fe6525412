//! Scripted classifier backend for tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::{ClassificationResult, ClassifierBackend, VisionError};

const FAKE_QUOTA_MARKERS: &[&str] = &["429", "quota", "rate_limit"];

#[derive(Debug)]
enum Outcome {
    Reply(ClassificationResult),
    Fail(String),
}

#[derive(Debug)]
pub struct ScriptedBackend {
    provider: &'static str,
    model: String,
    outcome: Outcome,
    calls: AtomicUsize,
    last_image: Mutex<Option<String>>,
}

impl ScriptedBackend {
    fn new(provider: &'static str, model: &str, outcome: Outcome) -> Self {
        Self {
            provider,
            model: model.to_string(),
            outcome,
            calls: AtomicUsize::new(0),
            last_image: Mutex::new(None),
        }
    }

    pub fn succeeding(provider: &'static str, model: &str, result: ClassificationResult) -> Self {
        Self::new(provider, model, Outcome::Reply(result))
    }

    pub fn failing(provider: &'static str, model: &str, message: &str) -> Self {
        Self::new(provider, model, Outcome::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<String> {
        self.last_image.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifierBackend for ScriptedBackend {
    async fn classify(&self, image_b64: &str) -> Result<ClassificationResult, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image_b64.to_string());
        match &self.outcome {
            Outcome::Reply(result) => Ok(result.clone()),
            Outcome::Fail(message) => Err(VisionError::RequestFailed(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn quota_markers(&self) -> &'static [&'static str] {
        FAKE_QUOTA_MARKERS
    }
}
