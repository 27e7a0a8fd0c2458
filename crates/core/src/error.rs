//! Unified error types for city-explorer.
//!
//! Every lookup failure is terminal for the request that raised it. Nothing
//! is retried here and nothing is fatal to the process.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

use crate::config::ConfigError;

/// Unified error types for the city-explorer service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty search query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The geocoder returned no candidates for the query.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// A remote provider could not be reached or answered with an error.
    #[error("PROVIDER_UNAVAILABLE: {0}")]
    ProviderUnavailable(String),

    /// A remote provider rejected our credentials.
    #[error("PROVIDER_AUTH: {0}")]
    ProviderAuth(String),

    /// A remote provider throttled the request.
    #[error("PROVIDER_RATE_LIMITED: {0}")]
    ProviderRateLimited(String),

    /// A provider payload was missing required fields or had the wrong shape.
    #[error("DECODE_ERROR: {0}")]
    Decode(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Required configuration was missing when a provider was called.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),
}

impl Error {
    /// Whether this is a store-side failure rather than a caller or provider problem.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Database(_) | Error::MigrationFailed(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::ProviderUnavailable(msg) => (-32003, msg.clone()),
            Error::ProviderAuth(msg) => (-32004, msg.clone()),
            Error::ProviderRateLimited(msg) => (-32005, msg.clone()),
            Error::Decode(msg) => (-32006, msg.clone()),
            Error::Config(msg) => (-32007, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
