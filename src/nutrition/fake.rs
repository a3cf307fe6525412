//! In-memory nutrition source for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{FlavorRecord, NutritionError, NutritionSource, RecipeRecord};

#[derive(Debug, Default)]
pub struct FakeNutrition {
    pub recipe: Option<RecipeRecord>,
    pub flavor: Option<FlavorRecord>,
    /// Makes the recipe lookup fail like an unreachable proxy.
    pub recipe_fails: bool,
    recipe_calls: AtomicUsize,
    flavor_calls: AtomicUsize,
}

impl FakeNutrition {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_recipe(mut self, recipe: RecipeRecord) -> Self {
        self.recipe = Some(recipe);
        self
    }

    pub fn with_flavor(mut self, flavor: FlavorRecord) -> Self {
        self.flavor = Some(flavor);
        self
    }

    pub fn failing_recipe(mut self) -> Self {
        self.recipe_fails = true;
        self
    }

    pub fn recipe_calls(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    pub fn flavor_calls(&self) -> usize {
        self.flavor_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.recipe_calls() + self.flavor_calls()
    }
}

#[async_trait]
impl NutritionSource for FakeNutrition {
    async fn search_recipe(&self, _dish: &str) -> Result<Option<RecipeRecord>, NutritionError> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        if self.recipe_fails {
            return Err(NutritionError::RequestFailed("connection refused".into()));
        }
        Ok(self.recipe.clone())
    }

    async fn search_flavor(&self, _dish: &str) -> Result<Option<FlavorRecord>, NutritionError> {
        self.flavor_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.flavor.clone())
    }
}
