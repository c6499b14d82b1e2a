use reqwest::Url;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Placeholder written in place of credentials when a request is logged
pub const REDACTED: &str = "********";

/// The two ways a user can search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Name,
    Ingredients,
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recipe" | "name" => Ok(SearchMode::Name),
            "ingredients" | "ingredient" => Ok(SearchMode::Ingredients),
            other => Err(SearchError::InvalidInput(format!(
                "Invalid search mode: {}. Must be 'recipe' or 'ingredients'.",
                other
            ))),
        }
    }
}

/// Ingredients collected for an ingredient search.
///
/// Entries are trimmed and lower-cased on the way in, and duplicates are
/// rejected, so the list handed to a provider is already clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient; returns `false` for blanks and duplicates
    pub fn add(&mut self, ingredient: &str) -> bool {
        let normalized = normalize_ingredient(ingredient);
        if normalized.is_empty() || self.items.contains(&normalized) {
            return false;
        }
        self.items.push(normalized);
        true
    }

    /// Remove an ingredient; returns `false` if it was not in the list
    pub fn remove(&mut self, ingredient: &str) -> bool {
        let normalized = normalize_ingredient(ingredient);
        match self.items.iter().position(|i| *i == normalized) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn join(&self, separator: &str) -> String {
        self.items.join(separator)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = IngredientList::new();
        for ingredient in iter {
            list.add(ingredient.as_ref());
        }
        list
    }
}

fn normalize_ingredient(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

/// A validated user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Name(String),
    Ingredients(IngredientList),
}

impl SearchQuery {
    /// Search by recipe name; fails if the query is blank
    pub fn name(query: &str) -> Result<Self, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "Recipe name query cannot be empty".to_string(),
            ));
        }
        Ok(SearchQuery::Name(query.to_string()))
    }

    /// Search by ingredients; fails if nothing usable was collected
    pub fn ingredients(ingredients: IngredientList) -> Result<Self, SearchError> {
        if ingredients.is_empty() {
            return Err(SearchError::InvalidInput(
                "At least one ingredient is required".to_string(),
            ));
        }
        Ok(SearchQuery::Ingredients(ingredients))
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            SearchQuery::Name(_) => SearchMode::Name,
            SearchQuery::Ingredients(_) => SearchMode::Ingredients,
        }
    }

    /// Text form of the query, as a search box would show it
    pub fn display_text(&self) -> String {
        match self {
            SearchQuery::Name(query) => query.clone(),
            SearchQuery::Ingredients(list) => list.join(","),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
struct QueryParam {
    name: String,
    value: String,
    secret: bool,
}

/// A fully-formed provider request: endpoint plus ordered query parameters.
///
/// Credential parameters are marked secret. They are sent with the request
/// but rendered as [`REDACTED`] by [`ProviderRequest::log_safe_url`] and by
/// the `Debug` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    endpoint: String,
    params: Vec<QueryParam>,
}

impl ProviderRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    /// Append a plain parameter
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push(QueryParam {
            name: name.to_string(),
            value: value.to_string(),
            secret: false,
        });
        self
    }

    /// Append a credential parameter
    pub fn secret_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push(QueryParam {
            name: name.to_string(),
            value: value.into(),
            secret: true,
        });
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Value of the first parameter called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Parameter names in the order they are sent
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// The URL to execute, credentials included
    pub fn url(&self) -> Result<Url, SearchError> {
        self.build_url(false)
    }

    /// The URL with every credential replaced by [`REDACTED`]
    pub fn log_safe_url(&self) -> String {
        match self.build_url(true) {
            Ok(url) => url.to_string(),
            Err(_) => self.endpoint.clone(),
        }
    }

    fn build_url(&self, redact: bool) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            SearchError::Configuration(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for p in &self.params {
                let value = if redact && p.secret {
                    REDACTED
                } else {
                    p.value.as_str()
                };
                pairs.append_pair(&p.name, value);
            }
        }
        Ok(url)
    }
}

impl fmt::Debug for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRequest")
            .field("url", &self.log_safe_url())
            .finish()
    }
}

impl fmt::Display for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log_safe_url())
    }
}

/// Join a base URL and a path segment without doubling the slash
pub(crate) fn join_endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_list_normalizes_and_dedupes() {
        let mut list = IngredientList::new();
        assert!(list.add("  Egg "));
        assert!(list.add("Flour"));
        assert!(!list.add("EGG"));
        assert!(!list.add("   "));

        assert_eq!(list.as_slice(), &["egg".to_string(), "flour".to_string()]);
    }

    #[test]
    fn test_ingredient_list_remove_and_clear() {
        let mut list: IngredientList = ["egg", "flour", "milk"].into_iter().collect();
        assert!(list.remove(" Flour"));
        assert!(!list.remove("butter"));
        assert_eq!(list.join(","), "egg,milk");

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_search_query_rejects_blank_input() {
        assert!(matches!(
            SearchQuery::name("   "),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            SearchQuery::ingredients(IngredientList::new()),
            Err(SearchError::InvalidInput(_))
        ));
        assert_eq!(
            SearchQuery::name("  pasta carbonara ").unwrap(),
            SearchQuery::Name("pasta carbonara".to_string())
        );
    }

    #[test]
    fn test_search_mode_from_str() {
        assert_eq!("recipe".parse::<SearchMode>().unwrap(), SearchMode::Name);
        assert_eq!(
            "Ingredients".parse::<SearchMode>().unwrap(),
            SearchMode::Ingredients
        );
        assert!("both".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_log_safe_url_redacts_credentials() {
        let request = ProviderRequest::new("https://api.spoonacular.com/recipes/complexSearch")
            .param("query", "pasta")
            .param("number", 12)
            .secret_param("apiKey", "super-secret-key");

        let url = request.url().unwrap().to_string();
        assert!(url.contains("apiKey=super-secret-key"));

        let safe = request.log_safe_url();
        assert!(!safe.contains("super-secret-key"));
        assert!(safe.contains("apiKey=********"));
        assert!(safe.contains("query=pasta"));

        let debug = format!("{:?}", request);
        assert!(!debug.contains("super-secret-key"));

        // rendering for logs must leave the request itself untouched
        assert_eq!(request.get("apiKey"), Some("super-secret-key"));
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let request = ProviderRequest::new("https://example.com/search")
            .param("b", 1)
            .param("a", 2);
        assert_eq!(request.param_names(), vec!["b", "a"]);
        assert_eq!(
            request.url().unwrap().as_str(),
            "https://example.com/search?b=1&a=2"
        );
    }

    #[test]
    fn test_join_endpoint() {
        assert_eq!(
            join_endpoint("https://api.spoonacular.com/recipes/", "/complexSearch"),
            "https://api.spoonacular.com/recipes/complexSearch"
        );
    }
}
