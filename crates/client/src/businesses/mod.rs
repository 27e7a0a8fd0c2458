//! Yelp Fusion business search client.
//!
//! ### API
//!
//! - **Endpoint**: `https://api.yelp.com/v3/businesses/search`
//! - **Authentication**: `Authorization: Bearer <key>`.
//! - **Query**: `term=restaurants&latitude=..&longitude=..`
//! - **Normalization**: `businesses[]` becomes a list of `Business`.

pub mod response;

pub use response::BusinessSearchApiResponse;

use std::time::Duration;

use async_trait::async_trait;
use explorer_core::provider::RESTAURANT_TERM;
use explorer_core::{Business, BusinessSearch, Error};

use crate::ProviderError;
use crate::http;

/// Default base URL for Yelp Fusion.
const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "city-explorer/0.1";

/// Key name reported when the API key is missing.
const API_KEY_ENV: &str = "YELP_API";

/// Business search client configuration.
#[derive(Debug, Clone)]
pub struct BusinessSearchConfig {
    /// Bearer token, checked by `new()`.
    pub api_key: String,
    /// Base URL (default: https://api.yelp.com/v3).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for BusinessSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Yelp Fusion business search client.
#[derive(Debug, Clone)]
pub struct BusinessSearchClient {
    http: reqwest::Client,
    config: BusinessSearchConfig,
}

impl BusinessSearchClient {
    /// Create a new business search client with the given configuration.
    pub fn new(config: BusinessSearchConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(API_KEY_ENV));
        }

        let http = http::build_client(config.timeout, &config.user_agent)?;
        Ok(Self { http, config })
    }

    /// Search restaurants around a coordinate.
    pub async fn fetch_businesses(&self, latitude: f64, longitude: f64) -> Result<Vec<Business>, ProviderError> {
        let url = format!("{}/businesses/search", self.config.base_url);
        tracing::debug!(latitude, longitude, term = RESTAURANT_TERM, "searching businesses");

        let params = [
            ("term", RESTAURANT_TERM.to_string()),
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ];
        let request = self.http.get(&url).bearer_auth(&self.config.api_key).query(&params);

        let body: BusinessSearchApiResponse = http::get_json(request, self.name()).await?;
        body.into_businesses()
    }
}

#[async_trait]
impl BusinessSearch for BusinessSearchClient {
    fn name(&self) -> &str {
        "yelp"
    }

    async fn search_businesses(&self, latitude: f64, longitude: f64) -> Result<Vec<Business>, Error> {
        self.fetch_businesses(latitude, longitude).await.map_err(|e| e.into_core(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_missing_key() {
        let result = BusinessSearchClient::new(BusinessSearchConfig::default());
        assert!(matches!(result, Err(ProviderError::MissingApiKey(API_KEY_ENV))));
    }

    #[test]
    fn test_default_config() {
        let config = BusinessSearchConfig::default();
        assert_eq!(config.base_url, "https://api.yelp.com/v3");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_client_name() {
        let client =
            BusinessSearchClient::new(BusinessSearchConfig { api_key: "token".into(), ..Default::default() }).unwrap();
        assert_eq!(client.name(), "yelp");
    }
}
