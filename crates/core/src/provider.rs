//! Provider gateway: call contracts for the three remote data sources.
//!
//! Implementations normalize their wire payloads into the types below and
//! report failures through [`Error`]. Each call is made at most once per
//! cache miss; a failed call must leave the store untouched.

use async_trait::async_trait;

use crate::Error;

/// Search term sent with every business search.
pub const RESTAURANT_TERM: &str = "restaurants";

/// A geocoding match for an address.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One day of a daily forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub summary: String,
    /// Unix time in seconds.
    pub time: i64,
}

/// A business returned by the search provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    pub name: String,
    pub image_url: String,
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
}

/// Resolves a free-form address into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// An empty list means the address matched nothing.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, Error>;
}

/// Daily weather forecast for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    async fn daily_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<DailyForecast>, Error>;
}

/// Business search around a coordinate, term fixed to [`RESTAURANT_TERM`].
#[async_trait]
pub trait BusinessSearch: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    async fn search_businesses(&self, latitude: f64, longitude: f64) -> Result<Vec<Business>, Error>;
}
