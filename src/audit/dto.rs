use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::vision::Freshness;

/// Request body for `POST /audit-dish`. Nothing is validated up front.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    /// Caller's order reference; string or number, only logged.
    #[serde(default)]
    pub order_id: Option<Value>,
    /// Base64 photos, optionally as data URIs. Only the first is classified.
    #[serde(default)]
    pub photo_urls: Option<Vec<Value>>,
}

impl AuditRequest {
    /// The first slot, if it holds a non-empty string. Later entries are never used.
    pub fn first_photo(&self) -> Option<&str> {
        self.photo_urls
            .as_ref()
            .and_then(|urls| urls.first())
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    pub fn order_ref(&self) -> String {
        match &self.order_id {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Nutrition summary returned for a verified dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditData {
    pub is_food: bool,
    pub freshness: Freshness,
    /// Fixed trust tag for the winning source, not a measured confidence.
    pub score: u8,
    pub ingredients: Vec<String>,
    #[serde(serialize_with = "whole_number")]
    pub calories: f64,
    pub recipe_name: String,
    #[serde(serialize_with = "whole_number")]
    pub protein: f64,
    #[serde(serialize_with = "whole_number")]
    pub fat: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditResponse {
    Verified {
        status: &'static str,
        message: String,
        data: AuditData,
    },
    Rejected {
        status: &'static str,
        reason: String,
        #[serde(rename = "refundAmount")]
        refund_amount: u32,
    },
}

impl AuditResponse {
    pub fn verified(dish_name: &str, data: AuditData) -> Self {
        Self::Verified {
            status: "success",
            message: format!("Dish verified: {}", dish_name),
            data,
        }
    }

    pub fn rejected(reason: String) -> Self {
        Self::Rejected {
            status: "error",
            reason,
            refund_amount: 0,
        }
    }
}

/// Writes `250.0` as `250` so integral values read like integers.
fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
