use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

use crate::config::{FinderConfig, MatchingConfig};
use crate::error::SearchError;
use crate::model::{Recipe, RecipeId};
use crate::normalize::spoonacular as normalize;
use crate::providers::{ApiClient, RecipeProvider};
use crate::query::{join_endpoint, IngredientList, ProviderRequest};
use crate::ranking;

/// Separator Spoonacular expects between ingredients
const INGREDIENT_SEPARATOR: &str = ",+";
/// Maximize used ingredients, then minimize missing ones
const RANKING_MAXIMIZE_USED: u8 = 1;

pub struct SpoonacularProvider {
    client: ApiClient,
    base_url: String,
    api_key: String,
    max_results: usize,
    matching: MatchingConfig,
}

impl SpoonacularProvider {
    /// Create a new Spoonacular provider from configuration
    pub fn new(config: &FinderConfig) -> Result<Self, SearchError> {
        let spoonacular = &config.providers.spoonacular;
        // Try config first, then fall back to environment variable
        let api_key = spoonacular.resolve_api_key()?;

        Ok(SpoonacularProvider {
            client: ApiClient::new(Some(Duration::from_secs(config.timeout))),
            base_url: spoonacular.base_url.clone(),
            api_key,
            max_results: config.max_results,
            matching: config.matching.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        SpoonacularProvider {
            client: ApiClient::default(),
            base_url,
            api_key,
            max_results: 12,
            matching: MatchingConfig::default(),
        }
    }

    /// `complexSearch` request with recipe information and nutrition inlined
    pub fn name_request(&self, query: &str) -> Result<ProviderRequest, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "Recipe name query cannot be empty".to_string(),
            ));
        }

        Ok(ProviderRequest::new(join_endpoint(&self.base_url, "complexSearch"))
            .param("query", query)
            .param("number", self.max_results)
            .param("addRecipeInformation", true)
            .param("addRecipeNutrition", true)
            .param("fillIngredients", true)
            .secret_param("apiKey", &self.api_key))
    }

    /// `findByIngredients` request asking for a surplus of candidates
    pub fn ingredients_request(
        &self,
        ingredients: &IngredientList,
    ) -> Result<ProviderRequest, SearchError> {
        if ingredients.is_empty() {
            return Err(SearchError::InvalidInput(
                "At least one ingredient is required".to_string(),
            ));
        }

        let candidates = self
            .max_results
            .saturating_mul(self.matching.candidate_multiplier);
        Ok(
            ProviderRequest::new(join_endpoint(&self.base_url, "findByIngredients"))
                .param("ingredients", ingredients.join(INGREDIENT_SEPARATOR))
                .param("number", candidates)
                .param("ranking", RANKING_MAXIMIZE_USED)
                .param("ignorePantry", self.matching.ignore_pantry)
                .secret_param("apiKey", &self.api_key),
        )
    }

    /// `informationBulk` request for the given ids
    pub fn bulk_request(&self, ids: &[RecipeId]) -> ProviderRequest {
        let ids = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        ProviderRequest::new(join_endpoint(&self.base_url, "informationBulk"))
            .param("ids", ids)
            .param("includeNutrition", true)
            .secret_param("apiKey", &self.api_key)
    }

    /// `{id}/information` request
    pub fn detail_request(&self, id: &RecipeId) -> ProviderRequest {
        ProviderRequest::new(join_endpoint(
            &self.base_url,
            &format!("{}/information", id),
        ))
        .param("includeNutrition", true)
        .secret_param("apiKey", &self.api_key)
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn provider_name(&self) -> &str {
        "spoonacular"
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Recipe>, SearchError> {
        let request = self.name_request(query)?;
        let payload = self.client.get_json(&request).await?;

        let recipes = normalize::normalize_search(&payload);
        info!("Name search for '{}' returned {} recipes", query.trim(), recipes.len());
        Ok(recipes)
    }

    async fn search_by_ingredients(
        &self,
        ingredients: &IngredientList,
    ) -> Result<Vec<Recipe>, SearchError> {
        // Step 1: lightweight matches
        let request = self.ingredients_request(ingredients)?;
        let payload = self.client.get_json(&request).await?;
        let candidates = normalize::normalize_candidates(&payload);
        debug!("Initial ingredient search returned {} candidates", candidates.len());

        // Step 2: keep the ones worth a detail lookup
        let candidates = ranking::filter_candidates(
            candidates,
            ingredients.len(),
            &self.matching,
            self.max_results,
        );
        if candidates.is_empty() {
            info!("No candidates survived filtering for [{}]", ingredients.join(", "));
            return Ok(Vec::new());
        }

        // Step 3: full details for exactly the survivors
        let ids: Vec<RecipeId> = candidates.iter().map(|c| c.id.clone()).collect();
        let payload = self.client.get_json(&self.bulk_request(&ids)).await?;
        let details = normalize::normalize_bulk(&payload);
        debug!("Retrieved full details for {} recipes", details.len());

        // Step 4: merge and rank
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
        normalize::normalize_recipe(&payload).ok_or_else(|| {
            SearchError::provider(format!(
                "Recipe {} was missing from the provider response",
                id
            ))
        })
    }
}
