//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - either TTL is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.weather_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                field: "weather_ttl_minutes".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.restaurant_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                field: "restaurant_ttl_hours".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.legacy_age_formula {
            tracing::warn!(
                "legacy_age_formula is enabled; cached weather and restaurant groups \
                 will be treated as stale on every read"
            );
        }

        Ok(())
    }
}
