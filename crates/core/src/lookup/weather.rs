//! Weather lookups: a per-location group of forecast days with a minutes TTL.

use std::sync::Arc;

use chrono::Utc;

use crate::Error;
use crate::freshness::Ttl;
use crate::model::{Location, WeatherEntry};
use crate::provider::ForecastProvider;
use crate::store::Store;

use super::resolve;

/// Cache-aside controller for daily forecasts.
#[derive(Clone)]
pub struct WeatherCache {
    store: Store,
    provider: Arc<dyn ForecastProvider>,
    ttl: Ttl,
}

impl WeatherCache {
    pub fn new(store: Store, provider: Arc<dyn ForecastProvider>) -> Self {
        Self { store, provider, ttl: Ttl::weather() }
    }

    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Forecast days for a stored location.
    pub async fn lookup(&self, location: &Location) -> Result<Vec<WeatherEntry>, Error> {
        self.lookup_at(location, Utc::now().timestamp_millis()).await
    }

    /// Same as [`lookup`](Self::lookup) with an explicit clock reading in epoch millis.
    ///
    /// A fresh group is returned as stored. A missing or stale group is
    /// fetched, replaced atomically and the new rows returned. If the fetch
    /// fails, a stale group is left in place and the error surfaces.
    pub async fn lookup_at(&self, location: &Location, now: i64) -> Result<Vec<WeatherEntry>, Error> {
        let location = &resolve(&self.store, location).await?;
        let cached = self.store.weather_group(location.id).await?;

        match cached.first() {
            Some(first) if !self.ttl.is_stale(first.created_at, now) => {
                tracing::debug!(location_id = location.id, rows = cached.len(), "weather cache hit");
                return Ok(cached);
            }
            Some(first) => {
                tracing::debug!(
                    location_id = location.id,
                    age = self.ttl.age(first.created_at, now),
                    "weather group stale"
                );
            }
            None => tracing::debug!(location_id = location.id, "weather cache miss"),
        }

        let days = self.provider.daily_forecast(location.latitude, location.longitude).await?;
        let entries = days
            .iter()
            .map(|day| WeatherEntry::from_forecast(day, location.id, now))
            .collect::<Result<Vec<_>, _>>()?;

        self.store.replace_weather_group(location.id, &entries).await?;
        tracing::info!(
            location_id = location.id,
            days = entries.len(),
            provider = self.provider.name(),
            "refreshed weather"
        );
        Ok(entries)
    }
}
