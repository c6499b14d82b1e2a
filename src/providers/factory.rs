use crate::config::{FinderConfig, ProviderKind};
use crate::error::SearchError;
use crate::providers::{EdamamProvider, RecipeProvider, SpoonacularProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        kind: ProviderKind,
        config: &FinderConfig,
    ) -> Result<Box<dyn RecipeProvider>, SearchError> {
        match kind {
            ProviderKind::Spoonacular => Ok(Box::new(SpoonacularProvider::new(config)?)),
            ProviderKind::Edamam => Ok(Box::new(EdamamProvider::new(config)?)),
        }
    }

    /// Validate the configuration and create its active provider
    pub fn get_active_provider(
        config: &FinderConfig,
    ) -> Result<Box<dyn RecipeProvider>, SearchError> {
        config.validate()?;
        Self::create(config.active_provider, config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec![
            ProviderKind::Spoonacular.as_str(),
            ProviderKind::Edamam.as_str(),
        ]
    }
}
