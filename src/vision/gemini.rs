//! Gemini `generateContent` backend, JSON response mode.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    parse_classification, prompt::ANALYSIS_PROMPT, ClassificationResult, ClassifierBackend,
    VisionError,
};

const QUOTA_MARKERS: &[&str] = &["429", "quota", "Too Many Requests", "RESOURCE_EXHAUSTED"];

#[derive(Debug)]
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
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
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'static str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl ClassifierBackend for GeminiBackend {
    async fn classify(&self, image_b64: &str) -> Result<ClassificationResult, VisionError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: image_b64,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
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

        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::ParseError(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .filter(|t| !t.is_empty())
            .ok_or(VisionError::EmptyResponse)?;

        parse_classification(&text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn quota_markers(&self) -> &'static [&'static str] {
        QUOTA_MARKERS
    }
}

#[cfg(test)]
mod gemini_tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> GeminiBackend {
        GeminiBackend::new(
            reqwest::Client::new(),
            &format!("{}/", server.uri()),
            "test-key",
            "gemini-2.0-flash",
        )
    }

    #[tokio::test]
    async fn sends_inline_image_and_parses_reply() {
        let server = MockServer::start().await;
        let reply = json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "text": "{\"isFood\": true, \"dishName\": \"Masala Dosa\", \"type\": \"prepared\", \"calories\": 350}"
                    }]
                }
            }]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&reply))
            .expect(1)
            .mount(&server)
            .await;

        let result = backend(&server).classify("aGVsbG8=").await.unwrap();
        assert_eq!(result.dish_name.as_deref(), Some("Masala Dosa"));
        assert_eq!(result.calories, Some(350.0));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert!(parts[0]["text"].as_str().unwrap().contains("INDIAN CUISINE"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn resource_exhausted_is_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": { "code": 429, "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let err = backend.classify("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, VisionError::ApiError { status: 429, .. }));
        assert!(backend.is_quota_error(&err));
    }

    #[tokio::test]
    async fn server_error_is_not_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let err = backend.classify("aGVsbG8=").await.unwrap_err();
        assert!(!backend.is_quota_error(&err));
    }

    #[tokio::test]
    async fn text_split_across_parts_is_joined() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "{\"isFood\": true, \"dishName\": " },
                            { "text": "\"Idli\", \"calories\": 120}" }
                        ]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let result = backend(&server).classify("aGVsbG8=").await.unwrap();
        assert_eq!(result.dish_name.as_deref(), Some("Idli"));
        assert_eq!(result.calories, Some(120.0));
    }

    #[tokio::test]
    async fn missing_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = backend(&server).classify("aGVsbG8=").await.unwrap_err();
        assert!(matches!(err, VisionError::EmptyResponse));
    }
}
