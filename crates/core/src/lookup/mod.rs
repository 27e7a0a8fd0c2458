//! Cache-aside lookups, one controller per category.
//!
//! Every controller follows the same flow: read the store, serve a hit,
//! otherwise call the provider once, persist the result and return it.
//!
//! | category    | key            | expiry                       |
//! |-------------|----------------|------------------------------|
//! | location    | `search_query` | never                        |
//! | weather     | `location_id`  | first row older than 60 min  |
//! | restaurants | `location_id`  | first row older than 23 h    |

pub mod location;
pub mod restaurants;
pub mod weather;

use std::sync::Arc;

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::freshness::Ttl;
use crate::model::Location;
use crate::provider::{BusinessSearch, ForecastProvider, Geocoder};
use crate::store::Store;

pub use location::LocationCache;
pub use restaurants::RestaurantCache;
pub use weather::WeatherCache;

/// One of the independently cached data kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Location,
    Weather,
    Restaurants,
}

/// Rows removed by [`Explorer::purge_stale`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PurgeReport {
    pub weather_deleted: u64,
    pub restaurants_deleted: u64,
}

/// The three controllers sharing one store.
#[derive(Clone)]
pub struct Explorer {
    store: Store,
    pub locations: LocationCache,
    pub weather: WeatherCache,
    pub restaurants: RestaurantCache,
}

impl Explorer {
    pub fn new(
        store: Store, geocoder: Arc<dyn Geocoder>, forecast: Arc<dyn ForecastProvider>,
        search: Arc<dyn BusinessSearch>,
    ) -> Self {
        Self {
            locations: LocationCache::new(store.clone(), geocoder),
            weather: WeatherCache::new(store.clone(), forecast),
            restaurants: RestaurantCache::new(store.clone(), search),
            store,
        }
    }

    /// Replace the freshness rules of both expiring categories.
    pub fn with_ttls(mut self, weather: Ttl, restaurants: Ttl) -> Self {
        self.weather = self.weather.with_ttl(weather);
        self.restaurants = self.restaurants.with_ttl(restaurants);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Delete groups already past their TTL.
    ///
    /// `None` purges both expiring categories. Locations never expire, so
    /// asking for them is an input error.
    pub async fn purge_stale(&self, category: Option<Category>) -> Result<PurgeReport, Error> {
        let now = Utc::now().timestamp_millis();
        let mut report = PurgeReport::default();

        match category {
            Some(Category::Location) => {
                return Err(Error::InvalidInput("locations are permanent and cannot be purged".into()));
            }
            Some(Category::Weather) => {
                report.weather_deleted = self.store.purge_stale_weather(self.weather.ttl().cutoff(now)).await?;
            }
            Some(Category::Restaurants) => {
                report.restaurants_deleted =
                    self.store.purge_stale_restaurants(self.restaurants.ttl().cutoff(now)).await?;
            }
            None => {
                report.weather_deleted = self.store.purge_stale_weather(self.weather.ttl().cutoff(now)).await?;
                report.restaurants_deleted =
                    self.store.purge_stale_restaurants(self.restaurants.ttl().cutoff(now)).await?;
            }
        }

        tracing::info!(
            weather_deleted = report.weather_deleted,
            restaurants_deleted = report.restaurants_deleted,
            "purged stale groups"
        );
        Ok(report)
    }
}

/// Resolve a caller's descriptor to the stored location it names.
///
/// Groups are fetched with the stored coordinates, not the caller's.
pub(crate) async fn resolve(store: &Store, location: &Location) -> Result<Location, Error> {
    location.validate()?;
    store
        .location_by_id(location.id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("no stored location with id {}", location.id)))
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::Error;
    use crate::model::{Location, NewLocation};
    use crate::provider::{Business, BusinessSearch, DailyForecast, ForecastProvider, GeocodeCandidate, Geocoder};
    use crate::store::Store;

    /// Store holding a single location for group tests.
    pub async fn stored_location() -> (Store, Location) {
        let store = Store::open_in_memory().await.unwrap();
        let location = store
            .insert_location(&NewLocation {
                search_query: "Seattle, WA".into(),
                formatted_query: "Seattle, WA, USA".into(),
                latitude: 47.6,
                longitude: -122.3,
            })
            .await
            .unwrap();
        (store, location)
    }

    /// Canned provider response that counts how often it was asked.
    pub struct Canned<T> {
        response: Option<Vec<T>>,
        calls: AtomicUsize,
    }

    impl<T: Clone> Canned<T> {
        pub fn returning(response: Vec<T>) -> Self {
            Self { response: Some(response), calls: AtomicUsize::new(0) }
        }

        pub fn failing() -> Self {
            Self { response: None, calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<Vec<T>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| Error::ProviderUnavailable("fake provider down".into()))
        }
    }

    pub type FakeGeocoder = Canned<GeocodeCandidate>;
    pub type FakeForecast = Canned<DailyForecast>;
    pub type FakeBusinessSearch = Canned<Business>;

    #[async_trait]
    impl Geocoder for Canned<GeocodeCandidate> {
        fn name(&self) -> &str {
            "fake-geocoder"
        }

        async fn geocode(&self, _address: &str) -> Result<Vec<GeocodeCandidate>, Error> {
            self.respond()
        }
    }

    #[async_trait]
    impl ForecastProvider for Canned<DailyForecast> {
        fn name(&self) -> &str {
            "fake-forecast"
        }

        async fn daily_forecast(&self, _latitude: f64, _longitude: f64) -> Result<Vec<DailyForecast>, Error> {
            self.respond()
        }
    }

    #[async_trait]
    impl BusinessSearch for Canned<Business> {
        fn name(&self) -> &str {
            "fake-search"
        }

        async fn search_businesses(&self, _latitude: f64, _longitude: f64) -> Result<Vec<Business>, Error> {
            self.respond()
        }
    }
}
