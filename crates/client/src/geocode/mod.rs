//! Google Geocoding API client.
//!
//! ### API
//!
//! - **Endpoint**: `https://maps.googleapis.com/maps/api/geocode/json?address=..&key=..`
//! - **Authentication**: API key as the `key` query parameter.
//! - **Body status**: errors can arrive with HTTP 200; `status` is checked
//!   before results are read.
//! - **Normalization**: each result becomes a `GeocodeCandidate`.

pub mod response;

pub use response::GeocodeApiResponse;

use std::time::Duration;

use async_trait::async_trait;
use explorer_core::{Error, GeocodeCandidate, Geocoder};

use crate::ProviderError;
use crate::http;

/// Default base URL for the Google Maps APIs.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "city-explorer/0.1";

/// Key name reported when the API key is missing.
const API_KEY_ENV: &str = "GOOGLE_MAPS_API";

/// Geocoding client configuration.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// API key, checked by `new()`.
    pub api_key: String,
    /// Base URL (default: https://maps.googleapis.com/maps/api).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Google Geocoding API client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl GeocodeClient {
    /// Create a new geocoding client with the given configuration.
    pub fn new(config: GeocodeConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(API_KEY_ENV));
        }

        let http = http::build_client(config.timeout, &config.user_agent)?;
        Ok(Self { http, config })
    }

    /// Look up candidates for a free-form address.
    pub async fn fetch_candidates(&self, address: &str) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let url = format!("{}/geocode/json", self.config.base_url);
        tracing::debug!(address, "geocoding address");

        let request = self
            .http
            .get(&url)
            .query(&[("address", address), ("key", self.config.api_key.as_str())]);

        let body: GeocodeApiResponse = http::get_json(request, self.name()).await?;
        body.into_candidates()
    }
}

#[async_trait]
impl Geocoder for GeocodeClient {
    fn name(&self) -> &str {
        "google-geocoding"
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, Error> {
        self.fetch_candidates(address).await.map_err(|e| e.into_core(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeocodeConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_new_missing_key() {
        let result = GeocodeClient::new(GeocodeConfig::default());
        assert!(matches!(result, Err(ProviderError::MissingApiKey(_))));
    }

    #[test]
    fn test_client_new_with_key() {
        let client = GeocodeClient::new(GeocodeConfig { api_key: "test-key".into(), ..Default::default() }).unwrap();
        assert_eq!(client.name(), "google-geocoding");
    }
}
