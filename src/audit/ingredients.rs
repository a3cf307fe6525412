use serde_json::Value;

use crate::{lenient::value_to_text, nutrition::IngredientField};

/// Free-text ingredient lists are cut to this many entries.
const MAX_TEXT_INGREDIENTS: usize = 5;

pub fn parse_ingredients(field: &IngredientField) -> Vec<String> {
    match field {
        IngredientField::List(items) => items.clone(),
        IngredientField::Text(text) => parse_text(text),
        IngredientField::Missing => vec!["Spices".to_string(), "Main Ingredient".to_string()],
    }
}

fn parse_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Some(items) = parse_json_list(trimmed).or_else(|| parse_bare_list(trimmed)) {
            return items;
        }
    }

    text.split(',')
        .take(MAX_TEXT_INGREDIENTS)
        .map(|s| s.trim().to_string())
        .collect()
}

/// `['a', 'b']` and `["a", "b"]` both parse once quotes are normalized.
fn parse_json_list(text: &str) -> Option<Vec<String>> {
    match serde_json::from_str::<Value>(&text.replace('\'', "\"")).ok()? {
        Value::Array(items) => Some(items.iter().map(value_to_text).collect()),
        _ => None,
    }
}

/// `[a, b, c]` with unquoted items.
fn parse_bare_list(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(&['[', ']'][..]) {
        return None;
    }
    let items: Vec<String> = inner
        .split(',')
        .map(|s| s.trim().trim_matches(|c: char| c == '"' || c == '\'').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (!items.is_empty()).then_some(items)
}
