//! Recipe and flavor lookups behind the nutrition proxy.

mod client;
#[cfg(test)]
pub mod fake;
mod records;

pub use client::ProxyNutritionClient;
pub use records::{FlavorRecord, IngredientField, RecipeRecord};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("lookup request failed: {0}")]
    RequestFailed(String),

    #[error("lookup response could not be decoded: {0}")]
    Decode(String),
}

/// The two lookups the audit uses. A miss is `Ok(None)`.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn search_recipe(&self, dish: &str) -> Result<Option<RecipeRecord>, NutritionError>;

    async fn search_flavor(&self, dish: &str) -> Result<Option<FlavorRecord>, NutritionError>;
}
