//! Dark Sky forecast API client.
//!
//! ### API
//!
//! - **Endpoint**: `https://api.darksky.net/forecast/{key}/{lat},{lng}`
//! - **Authentication**: API key as a path segment.
//! - **Normalization**: `daily.data[]` becomes a list of `DailyForecast`.

pub mod response;

pub use response::ForecastApiResponse;

use std::time::Duration;

use async_trait::async_trait;
use explorer_core::{DailyForecast, Error, ForecastProvider};

use crate::ProviderError;
use crate::http;

/// Default base URL for the forecast API.
const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "city-explorer/0.1";

/// Key name reported when the API key is missing.
const API_KEY_ENV: &str = "DARK_SKY_API";

/// Forecast client configuration.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// API key, checked by `new()`.
    pub api_key: String,
    /// Base URL (default: https://api.darksky.net).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string.
    pub user_agent: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Dark Sky forecast client.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    config: ForecastConfig,
}

impl ForecastClient {
    /// Create a new forecast client with the given configuration.
    pub fn new(config: ForecastConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey(API_KEY_ENV));
        }

        let http = http::build_client(config.timeout, &config.user_agent)?;
        Ok(Self { http, config })
    }

    fn forecast_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/forecast/{}/{},{}", self.config.base_url, self.config.api_key, latitude, longitude)
    }

    /// Fetch the daily forecast for a coordinate.
    pub async fn fetch_daily(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>, ProviderError> {
        tracing::debug!(latitude, longitude, "fetching daily forecast");

        let request = self.http.get(self.forecast_url(latitude, longitude));
        let body: ForecastApiResponse = http::get_json(request, self.name()).await?;
        body.into_days()
    }
}

#[async_trait]
impl ForecastProvider for ForecastClient {
    fn name(&self) -> &str {
        "dark-sky"
    }

    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>, Error> {
        self.fetch_daily(latitude, longitude).await.map_err(|e| e.into_core(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_missing_key() {
        let result = ForecastClient::new(ForecastConfig::default());
        assert!(matches!(result, Err(ProviderError::MissingApiKey(API_KEY_ENV))));
    }

    #[test]
    fn test_forecast_url() {
        let client = ForecastClient::new(ForecastConfig {
            api_key: "abc123".into(),
            base_url: "http://localhost:9000".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(client.forecast_url(47.6, -122.3), "http://localhost:9000/forecast/abc123/47.6,-122.3");
    }
}
