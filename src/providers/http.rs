use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::SearchError;
use crate::query::ProviderRequest;

/// Thin JSON-over-HTTP client shared by the providers.
///
/// Every failure comes back as [`SearchError::Provider`]; request URLs are
/// only ever logged in their redacted form.
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e.without_url());
                Client::new()
            });

        Self { client }
    }

    pub async fn get_json(&self, request: &ProviderRequest) -> Result<Value, SearchError> {
        let url = request.url()?;
        debug!("Fetching from: {}", request.log_safe_url());

        // reqwest errors embed the request URL, which carries the credential
        let response = self.client.get(url).send().await.map_err(|e| {
            SearchError::provider_with_source(
                "Could not reach the recipe service",
                e.without_url(),
            )
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SearchError::provider_with_source(
                "Failed to read the recipe service response",
                e.without_url(),
            )
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(SearchError::provider(format!(
                "Recipe service returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        debug!("Received {} bytes from {}", body.len(), request.endpoint());
        serde_json::from_str(&body).map_err(|e| {
            SearchError::provider_with_source("Recipe service returned an unreadable response", e)
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(None)
    }
}
