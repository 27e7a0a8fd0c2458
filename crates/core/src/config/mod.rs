//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (CITY_EXPLORER_*)
//! 2. TOML config file (if CITY_EXPLORER_CONFIG_FILE set)
//! 3. Provider keys under their historical names (GOOGLE_MAPS_API, DARK_SKY_API, YELP_API)
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::freshness::{AgeFormula, AgeUnit, Ttl};

mod validation;

pub use validation::ConfigError;

/// Environment variable names the provider keys were historically read from,
/// paired with the config field they fill.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("GOOGLE_MAPS_API", "google_maps_api_key"),
    ("DARK_SKY_API", "dark_sky_api_key"),
    ("YELP_API", "yelp_api_key"),
];

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (CITY_EXPLORER_*)
/// 2. TOML config file (if CITY_EXPLORER_CONFIG_FILE set)
/// 3. GOOGLE_MAPS_API / DARK_SKY_API / YELP_API
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite database.
    ///
    /// Set via CITY_EXPLORER_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Google Maps geocoding API key.
    ///
    /// Set via CITY_EXPLORER_GOOGLE_MAPS_API_KEY or GOOGLE_MAPS_API.
    #[serde(default)]
    pub google_maps_api_key: Option<String>,

    /// Dark Sky forecast API key.
    ///
    /// Set via CITY_EXPLORER_DARK_SKY_API_KEY or DARK_SKY_API.
    #[serde(default)]
    pub dark_sky_api_key: Option<String>,

    /// Yelp Fusion bearer token.
    ///
    /// Set via CITY_EXPLORER_YELP_API_KEY or YELP_API.
    #[serde(default)]
    pub yelp_api_key: Option<String>,

    /// User-Agent string for provider requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Provider request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minutes a cached weather group stays fresh.
    #[serde(default = "default_weather_ttl_minutes")]
    pub weather_ttl_minutes: i64,

    /// Hours a cached restaurant group stays fresh.
    #[serde(default = "default_restaurant_ttl_hours")]
    pub restaurant_ttl_hours: i64,

    /// Compute group age with the historical formula that only unit-converts
    /// the stored timestamp. Off by default.
    #[serde(default)]
    pub legacy_age_formula: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./city-explorer.sqlite")
}

fn default_user_agent() -> String {
    "city-explorer/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_weather_ttl_minutes() -> i64 {
    60
}

fn default_restaurant_ttl_hours() -> i64 {
    23
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            google_maps_api_key: None,
            dark_sky_api_key: None,
            yelp_api_key: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            weather_ttl_minutes: default_weather_ttl_minutes(),
            restaurant_ttl_hours: default_restaurant_ttl_hours(),
            legacy_age_formula: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Age formula selected by `legacy_age_formula`.
    pub fn age_formula(&self) -> AgeFormula {
        if self.legacy_age_formula { AgeFormula::Legacy } else { AgeFormula::Elapsed }
    }

    /// Freshness rule for weather groups.
    pub fn weather_ttl(&self) -> Ttl {
        Ttl::new(AgeUnit::Minutes, self.weather_ttl_minutes, self.age_formula())
    }

    /// Freshness rule for restaurant groups.
    pub fn restaurant_ttl(&self) -> Ttl {
        Ttl::new(AgeUnit::Hours, self.restaurant_ttl_hours, self.age_formula())
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let legacy_names: Vec<&str> = LEGACY_KEYS.iter().map(|(env, _)| *env).collect();
        figment = figment.merge(Env::raw().only(&legacy_names).map(|key| legacy_field(key.as_str()).into()));

        if let Ok(config_path) = std::env::var("CITY_EXPLORER_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("CITY_EXPLORER_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Google Maps key, checked when the geocoder is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_google_maps_api_key(&self) -> Result<&str, ConfigError> {
        require(&self.google_maps_api_key, "google_maps_api_key", "GOOGLE_MAPS_API")
    }

    /// Dark Sky key, checked when the forecast client is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_dark_sky_api_key(&self) -> Result<&str, ConfigError> {
        require(&self.dark_sky_api_key, "dark_sky_api_key", "DARK_SKY_API")
    }

    /// Yelp bearer token, checked when the business search client is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is not set.
    pub fn require_yelp_api_key(&self) -> Result<&str, ConfigError> {
        require(&self.yelp_api_key, "yelp_api_key", "YELP_API")
    }
}

fn require<'a>(value: &'a Option<String>, field: &str, legacy_env: &str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::Missing {
            field: field.into(),
            hint: format!("Set CITY_EXPLORER_{} or {} environment variable", field.to_uppercase(), legacy_env),
        })
}

fn legacy_field(env_key: &str) -> String {
    LEGACY_KEYS
        .iter()
        .find(|(env, _)| env.eq_ignore_ascii_case(env_key))
        .map(|(_, field)| (*field).to_string())
        .unwrap_or_else(|| env_key.to_lowercase())
}
