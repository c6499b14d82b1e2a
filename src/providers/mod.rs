mod edamam;
mod factory;
mod http;
mod spoonacular;

pub use edamam::EdamamProvider;
pub use factory::ProviderFactory;
pub use http::ApiClient;
pub use spoonacular::SpoonacularProvider;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::model::{Recipe, RecipeId};
use crate::query::IngredientList;

/// Unified trait for all upstream recipe APIs
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Get the provider name (e.g., "spoonacular", "edamam")
    fn provider_name(&self) -> &str;

    /// Recipes whose name matches `query`, in provider order
    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SearchError>;

    /// Recipes that can be made from `ingredients`, best match first
    async fn search_by_ingredients(
        &self,
        ingredients: &IngredientList,
    ) -> Result<Vec<Recipe>, SearchError>;

    /// Full record for one recipe
    async fn fetch_details(&self, id: &RecipeId) -> Result<Recipe, SearchError>;
}
