//! Groq chat-completions backend with an `image_url` content block.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    parse_classification, prompt::ANALYSIS_PROMPT, ClassificationResult, ClassifierBackend,
    VisionError,
};

const QUOTA_MARKERS: &[&str] = &["429", "rate_limit"];

#[derive(Debug)]
pub struct GroqBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqBackend {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl ClassifierBackend for GroqBackend {
    async fn classify(&self, image_b64: &str) -> Result<ClassificationResult, VisionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentBlock::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    ContentBlock::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{}", image_b64),
                        },
                    },
                ],
            }],
            temperature: 0.3,
            max_completion_tokens: 1024,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VisionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VisionError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(VisionError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::ParseError(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_classification(&text)
    }

    fn provider_name(&self) -> &'static str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn quota_markers(&self) -> &'static [&'static str] {
        QUOTA_MARKERS
    }
}
