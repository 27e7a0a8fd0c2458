//! Provider client error types.

use std::sync::Arc;

use explorer_core::Error;

/// Errors from the geocoding, forecast and business search clients.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// API key not configured.
    #[error("missing API key: {0} not set")]
    MissingApiKey(&'static str),

    /// Authentication failed (invalid or revoked key).
    #[error("authentication failed: {0}")]
    AuthError(String),

    /// Rate limited by the provider.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Provider answered 200 with an error status in the body.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not valid JSON for the expected envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record in the response was missing a required field.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

impl ProviderError {
    /// Convert into the core taxonomy, tagging the message with the provider name.
    pub fn into_core(self, provider: &str) -> Error {
        let message = format!("{provider}: {self}");
        match self {
            ProviderError::MissingApiKey(_) => Error::Config(message),
            ProviderError::AuthError(_) => Error::ProviderAuth(message),
            ProviderError::RateLimited => Error::ProviderRateLimited(message),
            ProviderError::Parse(_) | ProviderError::Decode(_) => Error::Decode(message),
            ProviderError::HttpError { .. }
            | ProviderError::Upstream(_)
            | ProviderError::Timeout
            | ProviderError::Network(_) => Error::ProviderUnavailable(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::MissingApiKey("YELP_API");
        assert!(err.to_string().contains("YELP_API"));

        let err = ProviderError::HttpError { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_into_core() {
        assert!(matches!(ProviderError::AuthError("denied".into()).into_core("yelp"), Error::ProviderAuth(_)));
        assert!(matches!(ProviderError::RateLimited.into_core("yelp"), Error::ProviderRateLimited(_)));
        assert!(matches!(ProviderError::Decode("name".into()).into_core("yelp"), Error::Decode(_)));
        assert!(matches!(ProviderError::MissingApiKey("YELP_API").into_core("yelp"), Error::Config(_)));

        let err = ProviderError::Timeout.into_core("dark-sky");
        assert!(matches!(&err, Error::ProviderUnavailable(msg) if msg.starts_with("dark-sky:")));
    }
}
