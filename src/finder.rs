use log::{debug, info};

use crate::config::FinderConfig;
use crate::error::SearchError;
use crate::model::{Recipe, RecipeId};
use crate::providers::{ProviderFactory, RecipeProvider};
use crate::query::SearchQuery;

/// What a completed search produced.
///
/// An empty result is a normal outcome, distinct from any [`SearchError`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<Recipe>),
    NoResults,
}

impl SearchOutcome {
    fn from_recipes(recipes: Vec<Recipe>) -> Self {
        if recipes.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results(recipes)
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        match self {
            SearchOutcome::Results(recipes) => recipes,
            SearchOutcome::NoResults => &[],
        }
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        match self {
            SearchOutcome::Results(recipes) => recipes,
            SearchOutcome::NoResults => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoResults)
    }

    pub fn len(&self) -> usize {
        self.recipes().len()
    }
}

/// A search session bound to one provider.
///
/// Holds only the result set of the most recent successful search; each new
/// search replaces it wholesale. Overlapping searches are not coordinated,
/// callers that fire several at once must discard stale outcomes themselves.
pub struct RecipeFinder {
    provider: Box<dyn RecipeProvider>,
    last_query: Option<SearchQuery>,
    results: Vec<Recipe>,
}

impl RecipeFinder {
    pub fn new(provider: Box<dyn RecipeProvider>) -> Self {
        Self {
            provider,
            last_query: None,
            results: Vec::new(),
        }
    }

    /// Validate `config` and bind to its active provider
    pub fn from_config(config: &FinderConfig) -> Result<Self, SearchError> {
        Ok(Self::new(ProviderFactory::get_active_provider(config)?))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Run one search and remember its results
    pub async fn search(&mut self, query: SearchQuery) -> Result<SearchOutcome, SearchError> {
        debug!(
            "Searching {} by {:?}: {}",
            self.provider_name(),
            query.mode(),
            query.display_text()
        );

        let recipes = match &query {
            SearchQuery::Name(text) => self.provider.search_by_name(text).await?,
            SearchQuery::Ingredients(list) => self.provider.search_by_ingredients(list).await?,
        };

        info!("Search returned {} recipes", recipes.len());
        self.results = recipes.clone();
        self.last_query = Some(query);
        Ok(SearchOutcome::from_recipes(recipes))
    }

    /// Fetch the full record for one recipe from the provider
    pub async fn details(&self, id: &RecipeId) -> Result<Recipe, SearchError> {
        self.provider.fetch_details(id).await
    }

    /// A record from the most recent result set
    pub fn cached(&self, id: &RecipeId) -> Option<&Recipe> {
        self.results.iter().find(|r| &r.id == id)
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }
}
