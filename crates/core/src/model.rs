//! Record shapes for the three cached categories.

use chrono::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::provider::{Business, DailyForecast, GeocodeCandidate};

/// Display format for forecast days, e.g. `Tue Oct 15 2024`.
const DAY_FORMAT: &str = "%a %b %d %Y";

/// A geocoded place. Permanent once stored; `search_query` is the cache key.
///
/// Weather and restaurant lookups only read `id`, `latitude` and `longitude`,
/// so the two query strings may be omitted when a caller passes one back in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id: i64,
}

impl Location {
    /// Reject descriptors that cannot name a stored location.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for a non-positive id or coordinates
    /// outside the valid ranges.
    pub fn validate(&self) -> Result<(), Error> {
        if self.id <= 0 {
            return Err(Error::InvalidInput(format!("location id must be positive, got {}", self.id)));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidInput(format!(
                "coordinates out of range: {}, {}",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }
}

/// A location that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    pub fn from_candidate(search_query: &str, candidate: GeocodeCandidate) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: candidate.formatted_address,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
        }
    }

    pub(crate) fn with_id(self, id: i64) -> Location {
        Location {
            search_query: self.search_query,
            formatted_query: self.formatted_query,
            latitude: self.latitude,
            longitude: self.longitude,
            id,
        }
    }
}

/// One forecast day cached for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherEntry {
    pub forecast: String,
    pub time: String,
    pub location_id: i64,
    /// Epoch milliseconds at which the group was written.
    #[serde(skip_serializing, default)]
    pub created_at: i64,
}

impl WeatherEntry {
    /// Build a row from a provider forecast day.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the day's unix time is out of range.
    pub fn from_forecast(day: &DailyForecast, location_id: i64, created_at: i64) -> Result<Self, Error> {
        Ok(Self { forecast: day.summary.clone(), time: display_day(day.time)?, location_id, created_at })
    }
}

/// One business cached for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RestaurantEntry {
    pub name: String,
    pub image_url: String,
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
    pub location_id: i64,
    /// Epoch milliseconds at which the group was written.
    #[serde(skip_serializing, default)]
    pub created_at: i64,
}

impl RestaurantEntry {
    pub fn from_business(business: Business, location_id: i64, created_at: i64) -> Self {
        Self {
            name: business.name,
            image_url: business.image_url,
            price: business.price,
            rating: business.rating,
            url: business.url,
            location_id,
            created_at,
        }
    }
}

/// Render a unix timestamp (seconds) as a fixed-width UTC day string.
pub fn display_day(unix_secs: i64) -> Result<String, Error> {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|dt| dt.format(DAY_FORMAT).to_string())
        .ok_or_else(|| Error::Decode(format!("forecast time out of range: {unix_secs}")))
}
