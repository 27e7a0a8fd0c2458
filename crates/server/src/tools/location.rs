//! location tool implementation.
//!
//! Resolves a place name to a stored, geocoded location.

use explorer_core::Explorer;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{json_result, report};

/// Parameters for the location tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LocationParams {
    /// Free-form place name, e.g. "Seattle, WA". Surrounding whitespace is ignored.
    pub query: String,
}

/// Implementation of the location tool.
pub async fn location_impl(explorer: &Explorer, params: LocationParams) -> Result<CallToolResult, McpError> {
    let location = explorer
        .locations
        .lookup(&params.query)
        .await
        .map_err(|e| report("location", e))?;

    json_result(&location)
}
