//! Forgiving conversions for JSON produced by models and third-party lookups.
//!
//! Numbers show up as numbers, numeric strings or strings with units attached
//! ("250.4 kcal"). Enum-like fields sometimes carry values we do not know.
//! Both are mapped to `None` instead of failing the whole payload.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Parses the leading decimal number of `s`, ignoring anything after it.
pub fn parse_leading_f64(s: &str) -> Option<f64> {
    lazy_static! {
        static ref LEADING_NUMBER: Regex =
            Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
    }
    let m = LEADING_NUMBER.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_f64(s),
        _ => None,
    }
}

/// Renders a JSON scalar the way it would read in a list of ingredients.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(value_as_f64))
}

pub fn opt_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// Anything but an explicit `false` reads as `true`, including `null`.
pub fn not_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(!matches!(raw, Some(Value::Bool(false))))
}

/// Strings pass through, numbers and booleans become their text, the rest is `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}

pub fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => Some(items.iter().map(value_to_text).collect()),
        _ => None,
    })
}

#[cfg(test)]
mod lenient_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_number_variants() {
        assert_eq!(parse_leading_f64("250.4"), Some(250.4));
        assert_eq!(parse_leading_f64("  12 g"), Some(12.0));
        assert_eq!(parse_leading_f64("250.4 kcal"), Some(250.4));
        assert_eq!(parse_leading_f64(".5"), Some(0.5));
        assert_eq!(parse_leading_f64("-3"), Some(-3.0));
        assert_eq!(parse_leading_f64("kcal 12"), None);
        assert_eq!(parse_leading_f64(""), None);
    }

    #[test]
    fn value_as_f64_handles_numbers_and_strings() {
        assert_eq!(value_as_f64(&json!(7)), Some(7.0));
        assert_eq!(value_as_f64(&json!("8.25")), Some(8.25));
        assert_eq!(value_as_f64(&json!(null)), None);
        assert_eq!(value_as_f64(&json!([1])), None);
    }

    #[test]
    fn value_to_text_unquotes_strings_only() {
        assert_eq!(value_to_text(&json!("rice")), "rice");
        assert_eq!(value_to_text(&json!(3)), "3");
        assert_eq!(value_to_text(&json!(true)), "true");
    }
}
