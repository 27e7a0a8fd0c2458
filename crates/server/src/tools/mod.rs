//! MCP tool implementations.
//!
//! This module contains all tools exposed by the city-explorer server.

pub mod cache;
pub mod location;
pub mod restaurants;
pub mod weather;

pub use cache::{CachePurgeParams, purge_impl, stats_impl};
pub use location::{LocationParams, location_impl};
pub use restaurants::{RestaurantsParams, restaurants_impl};
pub use weather::{WeatherParams, weather_impl};

use explorer_core::Error;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

/// Serialize a tool output as pretty-printed JSON text.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("Failed to serialize output: {e}"), None))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Log a failed tool call and convert the error for the client.
pub(crate) fn report(tool: &'static str, err: Error) -> McpError {
    if err.is_internal() {
        tracing::error!(tool, error = %err, "tool failed");
    } else {
        tracing::warn!(tool, error = %err, "tool failed");
    }
    err.into()
}
