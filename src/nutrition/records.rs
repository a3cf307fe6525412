//! Typed views over the recipe and flavor lookup payloads.
//!
//! Both services return loosely shaped JSON: field names vary in casing,
//! numbers arrive as strings, and ingredient lists are sometimes a JSON-ish
//! string. Everything untyped is resolved here and nowhere else.

use serde_json::{Map, Value};

use crate::lenient::{value_as_f64, value_to_text};

/// Ingredient field as the recipe service sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientField {
    List(Vec<String>),
    Text(String),
    Missing,
}

impl IngredientField {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => Self::List(items.iter().map(value_to_text).collect()),
            Some(Value::String(s)) => Self::Text(s.clone()),
            _ => Self::Missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRecord {
    pub title: Option<String>,
    pub ingredients: IngredientField,
    pub energy: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlavorRecord {
    pub alias: Option<String>,
    pub category: Option<String>,
}

/// Picks the first recipe out of a search response.
///
/// Results live under `payload.data` or make up the body itself.
pub fn recipe_from_search(body: &Value) -> Option<RecipeRecord> {
    let list = body
        .get("payload")
        .and_then(|p| p.get("data"))
        .filter(|d| truthy(d))
        .unwrap_or(body);

    let record = list.as_array()?.first()?.as_object()?;

    Some(RecipeRecord {
        title: field(record, &["Recipe_title", "title"]).and_then(non_empty_text),
        ingredients: IngredientField::from_value(field(record, &["Ingredients"])),
        energy: field(record, &["Energy", "Calories"]).and_then(value_as_f64),
        protein: field(record, &["Protein"]).and_then(value_as_f64),
        fat: field(record, &["Total lipid (fat)", "Fat"]).and_then(value_as_f64),
    })
}

/// Reads an alias lookup response. `null`, empty lists and scalars are misses.
pub fn flavor_from_body(body: &Value) -> Option<FlavorRecord> {
    let body = body
        .get("payload")
        .and_then(|p| p.get("data"))
        .unwrap_or(body);

    let record = match body {
        Value::Object(map) => map,
        Value::Array(items) => items.iter().find_map(Value::as_object)?,
        _ => return None,
    };

    Some(FlavorRecord {
        alias: field(record, &["entity_alias_readable"]).and_then(non_empty_text),
        category: field(record, &["category_readable"]).and_then(non_empty_text),
    })
}

/// First truthy value among `names`, matching keys case-insensitively.
fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| {
        record
            .get(*name)
            .or_else(|| {
                record
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .filter(|v| truthy(v))
    })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    let text = value_to_text(value);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
