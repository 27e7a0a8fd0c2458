//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{
    CachePurgeParams, LocationParams, RestaurantsParams, WeatherParams, location_impl, purge_impl, restaurants_impl,
    stats_impl, weather_impl,
};

use explorer_core::Explorer;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for city-explorer.
#[derive(Clone)]
pub struct ExplorerServer {
    tool_router: ToolRouter<Self>,
    explorer: Explorer,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ExplorerServer {
    /// Create a new server handler around the shared lookups.
    pub fn new(explorer: Explorer) -> Self {
        Self { tool_router: Self::tool_router(), explorer }
    }

    /// Resolve a place name to coordinates.
    ///
    /// Geocoded once per distinct query; later calls are served from the store.
    #[tool(description = "Look up a place by name. Returns the stored location with id, address and coordinates.")]
    async fn location(&self, params: Parameters<LocationParams>) -> Result<CallToolResult, McpError> {
        location_impl(&self.explorer, params.0).await
    }

    #[tool(description = "Daily forecast for a location returned by the location tool. Cached for 60 minutes.")]
    async fn weather(&self, params: Parameters<WeatherParams>) -> Result<CallToolResult, McpError> {
        weather_impl(&self.explorer, params.0).await
    }

    #[tool(description = "Restaurants near a location returned by the location tool. Cached for 23 hours.")]
    async fn restaurants(&self, params: Parameters<RestaurantsParams>) -> Result<CallToolResult, McpError> {
        restaurants_impl(&self.explorer, params.0).await
    }

    /// Purge expired groups.
    #[tool(description = "Delete weather and restaurant groups that are past their TTL. Locations are never purged.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.explorer, params.0).await
    }

    #[tool(description = "Row counts for the locations, weather and restaurant tables.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.explorer).await
    }
}

impl ServerHandler for ExplorerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "city-explorer".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some("Call location first, then pass the returned object to weather or restaurants.".into()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
