use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;
use crate::query::REDACTED;

/// Which upstream recipe API answers searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Spoonacular,
    Edamam,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Spoonacular => "spoonacular",
            ProviderKind::Edamam => "edamam",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spoonacular" => Ok(ProviderKind::Spoonacular),
            "edamam" => Ok(ProviderKind::Edamam),
            other => Err(SearchError::Configuration(format!(
                "Unknown provider: {}",
                other
            ))),
        }
    }
}

/// Top-level configuration for the recipe finder
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// Provider used for every search
    #[serde(default)]
    pub active_provider: ProviderKind,
    /// Maximum number of recipes returned by one search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Ingredient-match filtering and ranking
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Per-provider endpoints and credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
    #[serde(default)]
    pub edamam: EdamamConfig,
}

#[derive(Deserialize, Clone)]
pub struct SpoonacularConfig {
    #[serde(default = "default_spoonacular_base_url")]
    pub base_url: String,
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            base_url: default_spoonacular_base_url(),
            api_key: None,
        }
    }
}

impl fmt::Debug for SpoonacularConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpoonacularConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

impl SpoonacularConfig {
    pub fn resolve_api_key(&self) -> Result<String, SearchError> {
        resolve_credential(
            self.api_key.as_deref(),
            std::env::var("SPOONACULAR_API_KEY").ok(),
            "Spoonacular API key",
        )
    }
}

#[derive(Deserialize, Clone)]
pub struct EdamamConfig {
    #[serde(default = "default_edamam_base_url")]
    pub base_url: String,
    /// Application id (can also be set via EDAMAM_APP_ID)
    pub app_id: Option<String>,
    /// Application key (can also be set via EDAMAM_APP_KEY)
    pub app_key: Option<String>,
    /// Recipe collection to search, "public" unless the account has more
    #[serde(default = "default_edamam_type")]
    pub recipe_type: String,
}

impl Default for EdamamConfig {
    fn default() -> Self {
        Self {
            base_url: default_edamam_base_url(),
            app_id: None,
            app_key: None,
            recipe_type: default_edamam_type(),
        }
    }
}

impl fmt::Debug for EdamamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdamamConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &redact(&self.app_id))
            .field("app_key", &redact(&self.app_key))
            .field("recipe_type", &self.recipe_type)
            .finish()
    }
}

impl EdamamConfig {
    pub fn resolve_app_id(&self) -> Result<String, SearchError> {
        resolve_credential(
            self.app_id.as_deref(),
            std::env::var("EDAMAM_APP_ID").ok(),
            "Edamam app id",
        )
    }

    pub fn resolve_app_key(&self) -> Result<String, SearchError> {
        resolve_credential(
            self.app_key.as_deref(),
            std::env::var("EDAMAM_APP_KEY").ok(),
            "Edamam app key",
        )
    }
}

/// Thresholds and weights for ingredient search
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Share of requested ingredients a recipe must use to be kept
    #[serde(default = "default_min_used_ratio")]
    pub min_used_ratio: f64,
    /// Missing-ingredient tolerance for multi-ingredient searches
    #[serde(default = "default_max_missed")]
    pub max_missed: u32,
    #[serde(default = "default_used_weight")]
    pub used_weight: i64,
    #[serde(default = "default_missed_weight")]
    pub missed_weight: i64,
    /// How many candidates to request per final result
    #[serde(default = "default_candidate_multiplier")]
    pub candidate_multiplier: usize,
    /// Leave pantry staples out of the missing-ingredient count
    #[serde(default = "default_ignore_pantry")]
    pub ignore_pantry: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_used_ratio: default_min_used_ratio(),
            max_missed: default_max_missed(),
            used_weight: default_used_weight(),
            missed_weight: default_missed_weight(),
            candidate_multiplier: default_candidate_multiplier(),
            ignore_pantry: default_ignore_pantry(),
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            active_provider: ProviderKind::default(),
            max_results: default_max_results(),
            timeout: default_timeout(),
            matching: MatchingConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

// Default value functions
fn default_max_results() -> usize {
    12
}

fn default_timeout() -> u64 {
    30
}

fn default_spoonacular_base_url() -> String {
    "https://api.spoonacular.com/recipes".to_string()
}

fn default_edamam_base_url() -> String {
    "https://api.edamam.com/api/recipes/v2".to_string()
}

fn default_edamam_type() -> String {
    "public".to_string()
}

fn default_min_used_ratio() -> f64 {
    0.5
}

fn default_max_missed() -> u32 {
    3
}

fn default_used_weight() -> i64 {
    2
}

fn default_missed_weight() -> i64 {
    1
}

fn default_candidate_multiplier() -> usize {
    2
}

fn default_ignore_pantry() -> bool {
    true
}

/// Pick the configured credential, falling back to the environment.
///
/// Blank values and template placeholders such as `YOUR_API_KEY` count as
/// missing.
fn resolve_credential(
    configured: Option<&str>,
    from_env: Option<String>,
    what: &str,
) -> Result<String, SearchError> {
    configured
        .map(str::to_string)
        .filter(|v| is_usable_credential(v))
        .or_else(|| from_env.filter(|v| is_usable_credential(v)))
        .map(|v| v.trim().to_string())
        .ok_or_else(|| SearchError::Configuration(format!("{} is missing", what)))
}

/// Credential as it may appear in `Debug` output
pub(crate) fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| REDACTED)
}

fn is_usable_credential(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.to_ascii_uppercase().starts_with("YOUR_")
}

fn validate_base_url(url: &str, what: &str) -> Result<(), SearchError> {
    let parsed = Url::parse(url).map_err(|e| {
        SearchError::Configuration(format!("{} base URL '{}' is invalid: {}", what, url, e))
    })?;
    if parsed.cannot_be_a_base() {
        return Err(SearchError::Configuration(format!(
            "{} base URL '{}' is not an absolute URL",
            what, url
        )));
    }
    Ok(())
}

impl FinderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__PROVIDERS__SPOONACULAR__API_KEY
    pub fn load() -> Result<Self, SearchError> {
        load_config()
    }

    /// Check that everything the active provider needs is present.
    ///
    /// Runs before any request is built; a failure here is a configuration
    /// fault, never a search fault.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Configuration(
                "max_results must be greater than zero".to_string(),
            ));
        }
        if self.matching.candidate_multiplier == 0 {
            return Err(SearchError::Configuration(
                "matching.candidate_multiplier must be greater than zero".to_string(),
            ));
        }
        if self
            .max_results
            .checked_mul(self.matching.candidate_multiplier)
            .is_none()
        {
            return Err(SearchError::Configuration(format!(
                "max_results ({}) times matching.candidate_multiplier ({}) is too large",
                self.max_results, self.matching.candidate_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&self.matching.min_used_ratio) {
            return Err(SearchError::Configuration(format!(
                "matching.min_used_ratio must be between 0 and 1, got {}",
                self.matching.min_used_ratio
            )));
        }

        match self.active_provider {
            ProviderKind::Spoonacular => {
                let spoonacular = &self.providers.spoonacular;
                validate_base_url(&spoonacular.base_url, "Spoonacular")?;
                spoonacular.resolve_api_key()?;
            }
            ProviderKind::Edamam => {
                let edamam = &self.providers.edamam;
                validate_base_url(&edamam.base_url, "Edamam")?;
                edamam.resolve_app_id()?;
                edamam.resolve_app_key()?;
            }
        }
        Ok(())
    }
}

/// Load configuration from file and environment variables
///
/// See [`FinderConfig::load`] for the source priority.
pub fn load_config() -> Result<FinderConfig, SearchError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__MATCHING__MAX_MISSED
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
