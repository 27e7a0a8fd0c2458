//! weather tool implementation.
//!
//! Returns the daily forecast group for a location, refreshing it after
//! 60 minutes.

use explorer_core::{Explorer, Location};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{json_result, report};

/// Parameters for the weather tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WeatherParams {
    /// A location returned by the location tool. Only `id`, `latitude` and
    /// `longitude` are required.
    pub location: Location,
}

/// Implementation of the weather tool.
pub async fn weather_impl(explorer: &Explorer, params: WeatherParams) -> Result<CallToolResult, McpError> {
    let days = explorer
        .weather
        .lookup(&params.location)
        .await
        .map_err(|e| report("weather", e))?;

    json_result(&days)
}
