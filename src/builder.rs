use std::fmt;
use std::time::Duration;

use crate::config::{redact, FinderConfig, MatchingConfig, ProviderKind};
use crate::error::SearchError;
use crate::finder::RecipeFinder;

/// Builder for configuring a [`RecipeFinder`]
///
/// Anything not set explicitly comes from [`FinderConfig::load`], or from the
/// configuration passed to [`RecipeFinderBuilder::config`].
#[derive(Default)]
pub struct RecipeFinderBuilder {
    config: Option<FinderConfig>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    app_id: Option<String>,
    app_key: Option<String>,
    base_url: Option<String>,
    max_results: Option<usize>,
    timeout: Option<Duration>,
    matching: Option<MatchingConfig>,
}

impl fmt::Debug for RecipeFinderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeFinderBuilder")
            .field("config", &self.config)
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("app_id", &redact(&self.app_id))
            .field("app_key", &redact(&self.app_key))
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .field("timeout", &self.timeout)
            .field("matching", &self.matching)
            .finish()
    }
}

impl RecipeFinderBuilder {
    /// Start from an explicit configuration instead of file and environment
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().config(FinderConfig::default());
    /// ```
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Choose the upstream API
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{ProviderKind, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().provider(ProviderKind::Edamam);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the Spoonacular API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the Edamam application id and key
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{ProviderKind, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder()
    ///     .provider(ProviderKind::Edamam)
    ///     .edamam_credentials("app-id", "app-key");
    /// ```
    pub fn edamam_credentials(mut self, app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self.app_key = Some(app_key.into());
        self
    }

    /// Override the base URL of the selected provider
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Cap the number of recipes a search returns
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Replace the ingredient filter thresholds and ranking weights
    pub fn matching(mut self, matching: MatchingConfig) -> Self {
        self.matching = Some(matching);
        self
    }

    /// Resolve the final configuration without creating a provider
    pub fn into_config(self) -> Result<FinderConfig, SearchError> {
        let mut config = match self.config {
            Some(config) => config,
            None => FinderConfig::load()?,
        };

        if let Some(provider) = self.provider {
            config.active_provider = provider;
        }
        if let Some(key) = self.api_key {
            config.providers.spoonacular.api_key = Some(key);
        }
        if let Some(app_id) = self.app_id {
            config.providers.edamam.app_id = Some(app_id);
        }
        if let Some(app_key) = self.app_key {
            config.providers.edamam.app_key = Some(app_key);
        }
        if let Some(url) = self.base_url {
            match config.active_provider {
                ProviderKind::Spoonacular => config.providers.spoonacular.base_url = url,
                ProviderKind::Edamam => config.providers.edamam.base_url = url,
            }
        }
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout.as_secs().max(1);
        }
        if let Some(matching) = self.matching {
            config.matching = matching;
        }
        Ok(config)
    }

    /// Validate the configuration and create the finder
    ///
    /// # Errors
    /// Returns [`SearchError::Configuration`] if credentials or the base URL
    /// of the selected provider are missing or invalid.
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{FinderConfig, RecipeFinder};
    ///
    /// let finder = RecipeFinder::builder()
    ///     .config(FinderConfig::default())
    ///     .api_key("spoonacular-api-key")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(finder.provider_name(), "spoonacular");
    /// ```
    pub fn build(self) -> Result<RecipeFinder, SearchError> {
        let config = self.into_config()?;
        RecipeFinder::from_config(&config)
    }
}

impl RecipeFinder {
    /// Creates a new builder for a recipe finder
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}
