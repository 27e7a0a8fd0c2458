//! Provider wiring from configuration.
//!
//! A provider whose key is not configured is replaced by [`Unconfigured`],
//! so the server still starts and only the affected tools fail.

use std::sync::Arc;

use async_trait::async_trait;
use explorer_client::{
    BusinessSearchClient, BusinessSearchConfig, ForecastClient, ForecastConfig, GeocodeClient, GeocodeConfig,
    ProviderError,
};
use explorer_core::{
    AppConfig, Business, BusinessSearch, ConfigError, DailyForecast, Error, ForecastProvider, GeocodeCandidate,
    Geocoder,
};

/// The three gateway implementations handed to the lookups.
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub forecast: Arc<dyn ForecastProvider>,
    pub search: Arc<dyn BusinessSearch>,
}

impl Providers {
    /// Build HTTP clients for every configured key.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let geocoder: Arc<dyn Geocoder> = match config.require_google_maps_api_key() {
            Ok(key) => Arc::new(GeocodeClient::new(GeocodeConfig {
                api_key: key.to_string(),
                timeout: config.timeout(),
                user_agent: config.user_agent.clone(),
                ..Default::default()
            })?),
            Err(missing) => Arc::new(Unconfigured::new(missing)),
        };

        let forecast: Arc<dyn ForecastProvider> = match config.require_dark_sky_api_key() {
            Ok(key) => Arc::new(ForecastClient::new(ForecastConfig {
                api_key: key.to_string(),
                timeout: config.timeout(),
                user_agent: config.user_agent.clone(),
                ..Default::default()
            })?),
            Err(missing) => Arc::new(Unconfigured::new(missing)),
        };

        let search: Arc<dyn BusinessSearch> = match config.require_yelp_api_key() {
            Ok(key) => Arc::new(BusinessSearchClient::new(BusinessSearchConfig {
                api_key: key.to_string(),
                timeout: config.timeout(),
                user_agent: config.user_agent.clone(),
                ..Default::default()
            })?),
            Err(missing) => Arc::new(Unconfigured::new(missing)),
        };

        tracing::info!(
            geocoder = geocoder.name(),
            forecast = forecast.name(),
            search = search.name(),
            "providers ready"
        );
        Ok(Self { geocoder, forecast, search })
    }
}

/// Stand-in for a provider without a key. Every call fails with `CONFIG_ERROR`.
#[derive(Debug, Clone)]
pub struct Unconfigured {
    reason: String,
}

impl Unconfigured {
    fn new(missing: ConfigError) -> Self {
        tracing::warn!(%missing, "provider disabled");
        Self { reason: missing.to_string() }
    }

    fn fail<T>(&self) -> Result<T, Error> {
        Err(Error::Config(self.reason.clone()))
    }
}

#[async_trait]
impl Geocoder for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn geocode(&self, _address: &str) -> Result<Vec<GeocodeCandidate>, Error> {
        self.fail()
    }
}

#[async_trait]
impl ForecastProvider for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn daily_forecast(&self, _latitude: f64, _longitude: f64) -> Result<Vec<DailyForecast>, Error> {
        self.fail()
    }
}

#[async_trait]
impl BusinessSearch for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn search_businesses(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Business>, Error> {
        self.fail()
    }
}
