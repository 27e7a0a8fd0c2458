//! Core types and shared functionality for city-explorer.
//!
//! This crate provides:
//! - SQLite-backed store for locations, weather and restaurant groups
//! - Provider gateway traits for geocoding, forecasts and business search
//! - Per-category cache-aside lookups with independent TTL rules
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod freshness;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use freshness::{AgeFormula, AgeUnit, Ttl};
pub use lookup::{Category, Explorer, LocationCache, PurgeReport, RestaurantCache, WeatherCache};
pub use model::{Location, NewLocation, RestaurantEntry, WeatherEntry};
pub use provider::{Business, BusinessSearch, DailyForecast, ForecastProvider, GeocodeCandidate, Geocoder};
pub use store::{Store, StoreCounts};
