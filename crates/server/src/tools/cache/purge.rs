//! cache_purge tool implementation.
//!
//! Deletes weather and restaurant groups that are already past their TTL.
//! Locations are permanent and never purged.

use explorer_core::{Category, Explorer};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{json_result, report};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Restrict the purge to `weather` or `restaurants`. Both when omitted.
    pub category: Option<Category>,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(explorer: &Explorer, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    let purged = explorer
        .purge_stale(params.category)
        .await
        .map_err(|e| report("cache_purge", e))?;

    json_result(&purged)
}
