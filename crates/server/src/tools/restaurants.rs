//! restaurants tool implementation.

use explorer_core::{Explorer, Location};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{json_result, report};

/// Parameters for the restaurants tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RestaurantsParams {
    /// A location returned by the location tool.
    pub location: Location,
}

/// Implementation of the restaurants tool. Groups are refreshed after 23 hours.
pub async fn restaurants_impl(explorer: &Explorer, params: RestaurantsParams) -> Result<CallToolResult, McpError> {
    let restaurants = explorer
        .restaurants
        .lookup(&params.location)
        .await
        .map_err(|e| report("restaurants", e))?;

    json_result(&restaurants)
}
