use tracing::{error, info, warn};

use super::{
    dto::{AuditRequest, AuditResponse},
    merge::{dish_name, merge},
};
use crate::{
    nutrition::{FlavorRecord, NutritionSource, RecipeRecord},
    state::AppState,
};

/// Classify the first photo, look up prepared dishes, merge.
pub async fn run_audit(state: &AppState, request: &AuditRequest) -> AuditResponse {
    let classification = match request.first_photo() {
        Some(photo) => Some(state.classifier.classify(photo).await),
        None => {
            warn!("no photo in request, skipping classification");
            None
        }
    };

    if let Some(c) = classification.as_ref().filter(|c| !c.is_food) {
        let reason = c.rejection_reason();
        info!(%reason, "photo rejected");
        return AuditResponse::rejected(reason);
    }

    let dish = dish_name(classification.as_ref());
    let packaged = classification.as_ref().map_or(false, |c| c.is_packaged());

    let (recipe, flavor) = if packaged {
        info!(%dish, "packaged item, trusting classifier ingredients");
        (None, None)
    } else {
        info!(%dish, "prepared dish, querying nutrition databases");
        lookup(state.nutrition.as_ref(), &dish).await
    };

    let data = merge(classification.as_ref(), recipe.as_ref(), flavor.as_ref());
    info!(
        %dish,
        score = data.score,
        calories = data.calories,
        category = %data.category,
        "audit merged"
    );
    AuditResponse::verified(&dish, data)
}

/// Recipe search, then flavor search. A failed lookup counts as no data.
async fn lookup(
    source: &dyn NutritionSource,
    dish: &str,
) -> (Option<RecipeRecord>, Option<FlavorRecord>) {
    let recipe = source.search_recipe(dish).await.unwrap_or_else(|e| {
        error!(error = %e, dish, "RecipeDB search failed");
        None
    });

    let flavor = source.search_flavor(dish).await.unwrap_or_else(|e| {
        error!(error = %e, dish, "FlavorDB search failed");
        None
    });

    (recipe, flavor)
}
