use serde::{Deserialize, Serialize};

use crate::lenient;

pub const UNAVAILABLE_MESSAGE: &str = "All AI providers are currently unavailable. \
Gemini quota exceeded and Groq failed. Please wait a few minutes and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    /// Branded or manufactured items; the model's label reading is trusted.
    Packaged,
    /// Cooked or composed dishes; the nutrition databases are trusted.
    Prepared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Caution,
    Spoiled,
}

/// Structured judgment returned by a vision model for one photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Only an explicit `false` rejects the photo.
    #[serde(default = "default_is_food", deserialize_with = "lenient::not_false")]
    pub is_food: bool,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub dish_name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::opt_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub food_type: Option<FoodType>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredients: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub freshness: Option<Freshness>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub calories: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub protein: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub fat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

fn default_is_food() -> bool {
    true
}

impl ClassificationResult {
    /// Terminal result once every backend has failed.
    pub fn unavailable() -> Self {
        Self {
            is_food: false,
            dish_name: None,
            food_type: None,
            ingredients: None,
            freshness: None,
            calories: None,
            protein: None,
            fat: None,
            reason: None,
            error: Some(UNAVAILABLE_MESSAGE.to_string()),
        }
    }

    pub fn is_packaged(&self) -> bool {
        self.food_type == Some(FoodType::Packaged)
    }

    /// Text explaining a rejection, most specific first.
    pub fn rejection_reason(&self) -> String {
        [&self.reason, &self.error]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| "Image does not appear to be food.".to_string())
    }
}
