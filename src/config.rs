use serde::Deserialize;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_NUTRITION_PROXY_URL: &str = "http://127.0.0.1:8000";

/// Gemini models tried in order; each draws on a separate quota.
pub const DEFAULT_GEMINI_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash-001",
];

/// Groq models with image input.
pub const DEFAULT_GROQ_MODELS: &[&str] = &[
    "meta-llama/llama-4-scout-17b-16e-instruct",
    "meta-llama/llama-4-maverick-17b-128e-instruct",
];

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisionConfig {
    pub gemini: ProviderConfig,
    pub groq: ProviderConfig,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub proxy_url: String,
    pub bearer_token: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub vision: VisionConfig,
    pub nutrition: NutritionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        // A key still holding its "TODO" placeholder counts as unset.
        let gemini_key = non_empty_env("GEMINI_API_KEY").filter(|k| !k.starts_with("TODO"));

        let vision = VisionConfig {
            gemini: ProviderConfig {
                api_key: gemini_key,
                base_url: std::env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.into()),
                models: model_list("GEMINI_MODELS", DEFAULT_GEMINI_MODELS),
            },
            groq: ProviderConfig {
                api_key: non_empty_env("GROQ_API_KEY"),
                base_url: std::env::var("GROQ_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.into()),
                models: model_list("GROQ_MODELS", DEFAULT_GROQ_MODELS),
            },
            timeout_secs,
        };

        let nutrition = NutritionConfig {
            proxy_url: std::env::var("NUTRITION_PROXY_URL")
                .unwrap_or_else(|_| DEFAULT_NUTRITION_PROXY_URL.into()),
            bearer_token: std::env::var("NUTRITION_PROXY_TOKEN").unwrap_or_default(),
            timeout_secs,
        };

        Ok(Self { vision, nutrition })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn model_list(var: &str, defaults: &[&str]) -> Vec<String> {
    std::env::var(var)
        .ok()
        .map(|v| parse_model_list(&v))
        .filter(|models| !models.is_empty())
        .unwrap_or_else(|| defaults.iter().map(|m| m.to_string()).collect())
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
