use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// Missing or invalid credentials, base URL or settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream provider failed or answered with something unusable.
    ///
    /// Only `message` is displayed; the underlying cause stays reachable
    /// through [`std::error::Error::source`] for diagnostics.
    #[error("{message}")]
    Provider {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The caller handed over an empty query or ingredient list
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SearchError {
    pub fn provider(message: impl Into<String>) -> Self {
        SearchError::Provider {
            message: message.into(),
            source: None,
        }
    }

    pub fn provider_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        SearchError::Provider {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SearchError::Configuration(_))
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, SearchError::Provider { .. })
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        SearchError::Configuration(err.to_string())
    }
}
