//! cache_stats tool implementation.
//!
//! Reports row counts per table.

use explorer_core::Explorer;
use rmcp::{ErrorData as McpError, model::CallToolResult};

use crate::tools::{json_result, report};

/// Implementation of the cache_stats tool.
pub async fn stats_impl(explorer: &Explorer) -> Result<CallToolResult, McpError> {
    let counts = explorer.store().counts().await.map_err(|e| report("cache_stats", e))?;
    json_result(&counts)
}
