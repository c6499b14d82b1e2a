use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

use crate::config::{FinderConfig, MatchingConfig};
use crate::error::SearchError;
use crate::model::{Recipe, RecipeId};
use crate::normalize::edamam as normalize;
use crate::providers::{ApiClient, RecipeProvider};
use crate::query::{join_endpoint, IngredientList, ProviderRequest};
use crate::ranking;

/// Edamam takes a free-text query, so ingredients are space separated
const INGREDIENT_SEPARATOR: &str = " ";

pub struct EdamamProvider {
    client: ApiClient,
    base_url: String,
    app_id: String,
    app_key: String,
    recipe_type: String,
    max_results: usize,
    matching: MatchingConfig,
}

impl EdamamProvider {
    /// Create a new Edamam provider from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, SearchError> {
        let edamam = &config.providers.edamam;
        let app_id = edamam.resolve_app_id()?;
        let app_key = edamam.resolve_app_key()?;

        Ok(EdamamProvider {
            client: ApiClient::new(Some(Duration::from_secs(config.timeout))),
            base_url: edamam.base_url.clone(),
            app_id,
            app_key,
            recipe_type: edamam.recipe_type.clone(),
            max_results: config.max_results,
            matching: config.matching.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(app_id: String, app_key: String, base_url: String) -> Self {
        EdamamProvider {
            client: ApiClient::default(),
            base_url,
            app_id,
            app_key,
            recipe_type: "public".to_string(),
            max_results: 12,
            matching: MatchingConfig::default(),
        }
    }

    fn search_request(&self, query: &str) -> ProviderRequest {
        ProviderRequest::new(self.base_url.clone())
            .param("type", &self.recipe_type)
            .param("q", query)
            .secret_param("app_id", &self.app_id)
            .secret_param("app_key", &self.app_key)
    }

    pub fn name_request(&self, query: &str) -> Result<ProviderRequest, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "Recipe name query cannot be empty".to_string(),
            ));
        }
        Ok(self.search_request(query))
    }

    pub fn ingredients_request(
        &self,
        ingredients: &IngredientList,
    ) -> Result<ProviderRequest, SearchError> {
        if ingredients.is_empty() {
            return Err(SearchError::InvalidInput(
                "At least one ingredient is required".to_string(),
            ));
        }
        Ok(self.search_request(&ingredients.join(INGREDIENT_SEPARATOR)))
    }

    pub fn detail_request(&self, id: &RecipeId) -> ProviderRequest {
        ProviderRequest::new(join_endpoint(&self.base_url, &id.to_string()))
            .param("type", &self.recipe_type)
            .secret_param("app_id", &self.app_id)
            .secret_param("app_key", &self.app_key)
    }
}

#[async_trait]
impl RecipeProvider for EdamamProvider {
    fn provider_name(&self) -> &str {
        "edamam"
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SearchError> {
        let request = self.name_request(query)?;
        let payload = self.client.get_json(&request).await?;

        let mut recipes = normalize::normalize_search(&payload);
        recipes.truncate(self.max_results);
        info!("Name search for '{}' returned {} recipes", query.trim(), recipes.len());
        Ok(recipes)
    }

    /// Hits already carry full detail, so candidates are derived locally
    /// and no enrichment round-trip is made.
    async fn search_by_ingredients(
        &self,
        ingredients: &IngredientList,
    ) -> Result<Vec<Recipe>, SearchError> {
        let request = self.ingredients_request(ingredients)?;
        let payload = self.client.get_json(&request).await?;
        let hits = normalize::normalize_search(&payload);

        let candidates = hits
            .iter()
            .map(|recipe| {
                normalize::match_ingredients(recipe, ingredients, self.matching.ignore_pantry)
            })
            .collect();
        let candidates = ranking::filter_candidates(
            candidates,
            ingredients.len(),
            &self.matching,
            self.max_results,
        );
        debug!("{} of {} hits matched the ingredients", candidates.len(), hits.len());

        let details: Vec<Recipe> = candidates
            .iter()
            .filter_map(|c| hits.iter().find(|r| r.id == c.id).cloned())
            .collect();

        let recipes = ranking::rank(
            ranking::merge_details(&candidates, details),
            &self.matching,
        );
        info!(
            "Ingredient search for [{}] returned {} recipes",
            ingredients.join(", "),
            recipes.len()
        );
        Ok(recipes)
    }

    async fn fetch_details(&self, id: &RecipeId) -> Result<Recipe, SearchError> {
        let payload = self.client.get_json(&self.detail_request(id)).await?;
        normalize::normalize_detail(&payload).ok_or_else(|| {
            SearchError::provider(format!(
                "Recipe {} was missing from the provider response",
                id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> EdamamProvider {
        EdamamProvider::with_base_url(
            "my-app".to_string(),
            "my-key".to_string(),
            "https://api.edamam.com/api/recipes/v2".to_string(),
        )
    }

    #[test]
    fn test_requests_carry_both_credentials() {
        let request = provider().name_request("chicken").unwrap();

        assert_eq!(request.endpoint(), "https://api.edamam.com/api/recipes/v2");
        assert_eq!(request.param_names(), vec!["type", "q", "app_id", "app_key"]);
        assert_eq!(request.get("type"), Some("public"));

        let safe = request.log_safe_url();
        assert!(!safe.contains("my-app"));
        assert!(!safe.contains("my-key"));
    }

    #[test]
    fn test_ingredients_request_joins_with_spaces() {
        let ingredients: IngredientList = ["chicken", "garlic"].into_iter().collect();
        let request = provider().ingredients_request(&ingredients).unwrap();
        assert_eq!(request.get("q"), Some("chicken garlic"));
    }

    #[test]
    fn test_detail_request() {
        let request = provider().detail_request(&RecipeId::Text("b79327d0".to_string()));
        assert_eq!(
            request.endpoint(),
            "https://api.edamam.com/api/recipes/v2/b79327d0"
        );
    }
}
