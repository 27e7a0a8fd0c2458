//! Request plumbing shared by the provider clients.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, header};
use serde::de::DeserializeOwned;

use crate::ProviderError;

pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| ProviderError::Network(Arc::new(e)))
}

/// Send a GET and decode the JSON body.
///
/// 401/403 map to `AuthError`, 429 to `RateLimited`, any other 4xx/5xx to
/// `HttpError`.
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder, provider: &str) -> Result<T, ProviderError> {
    let start = Instant::now();

    let response = request.header(header::ACCEPT, "application/json").send().await?;

    let status = response.status();
    tracing::debug!(provider, %status, "provider response status");

    if status == 401 || status == 403 {
        return Err(ProviderError::AuthError(format!("HTTP {}", status.as_u16())));
    }

    if status == 429 {
        return Err(ProviderError::RateLimited);
    }

    if status.is_client_error() || status.is_server_error() {
        return Err(ProviderError::HttpError { status: status.as_u16() });
    }

    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;

    tracing::debug!(provider, elapsed = ?start.elapsed(), "provider request completed");
    Ok(body)
}
