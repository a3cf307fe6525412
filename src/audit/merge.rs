//! Source-priority rules for the final nutrition summary.
//!
//! Packaged items trust the classifier: the databases do not know brands.
//! Prepared dishes trust the recipe database, then the flavor database,
//! then fall back to the classifier.

use super::{dto::AuditData, ingredients::parse_ingredients};
use crate::{
    nutrition::{FlavorRecord, RecipeRecord},
    vision::{ClassificationResult, Freshness},
};

pub const DEFAULT_DISH_NAME: &str = "Detected Dish";

const SCORE_RECIPE_MATCH: u8 = 92;
const SCORE_FLAVOR_MATCH: u8 = 88;
const SCORE_CLASSIFIER_ONLY: u8 = 85;
const SCORE_NO_SOURCE: u8 = 50;

pub fn dish_name(classification: Option<&ClassificationResult>) -> String {
    classification
        .and_then(|c| c.dish_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DISH_NAME)
        .to_string()
}

pub fn merge(
    classification: Option<&ClassificationResult>,
    recipe: Option<&RecipeRecord>,
    flavor: Option<&FlavorRecord>,
) -> AuditData {
    let dish = dish_name(classification);
    let packaged = classification.map_or(false, ClassificationResult::is_packaged);
    let classifier_calories = classification.and_then(|c| c.calories).unwrap_or(0.0);

    let (ingredients, mut calories) = if packaged {
        classifier_fields(classification)
    } else if let Some(recipe) = recipe {
        (
            parse_ingredients(&recipe.ingredients),
            recipe.energy.map(round_half_up).unwrap_or(0.0),
        )
    } else if let Some(flavor) = flavor {
        (vec![flavor.alias.clone().unwrap_or_else(|| dish.clone())], 0.0)
    } else {
        classifier_fields(classification)
    };

    if calories == 0.0 && classifier_calories != 0.0 {
        calories = classifier_calories;
    }

    let score = if recipe.is_some() {
        SCORE_RECIPE_MATCH
    } else if flavor.is_some() {
        SCORE_FLAVOR_MATCH
    } else if classification.is_some() {
        SCORE_CLASSIFIER_ONLY
    } else {
        SCORE_NO_SOURCE
    };

    let recipe_name = recipe
        .and_then(|r| r.title.clone())
        .or_else(|| flavor.and_then(|f| f.alias.clone()))
        .unwrap_or_else(|| dish.clone());

    let (protein, fat) = match recipe {
        Some(r) => (r.protein.unwrap_or(0.0), r.fat.unwrap_or(0.0)),
        None => (
            classification.and_then(|c| c.protein).unwrap_or(0.0),
            classification.and_then(|c| c.fat).unwrap_or(0.0),
        ),
    };

    let category = flavor
        .and_then(|f| f.category.clone())
        .unwrap_or_else(|| {
            if packaged {
                "Packaged Snack".to_string()
            } else {
                "General Food".to_string()
            }
        });

    AuditData {
        is_food: true,
        freshness: classification
            .and_then(|c| c.freshness)
            .unwrap_or(Freshness::Fresh),
        score,
        ingredients,
        calories,
        recipe_name,
        protein,
        fat,
        category,
    }
}

/// Halves round toward positive infinity: 2.5 -> 3, -2.5 -> -2.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn classifier_fields(classification: Option<&ClassificationResult>) -> (Vec<String>, f64) {
    let ingredients = classification
        .and_then(|c| c.ingredients.clone())
        .unwrap_or_else(|| vec!["Unknown".to_string()]);
    let calories = classification.and_then(|c| c.calories).unwrap_or(0.0);
    (ingredients, calories)
}
