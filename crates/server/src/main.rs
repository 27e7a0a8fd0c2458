//! city-explorer server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use explorer_core::{AppConfig, Explorer, Store};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod providers;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(db_path = %config.db_path.display(), "Starting city-explorer server on stdio transport");

    let store = Store::open(&config.db_path).await?;
    let providers = providers::Providers::from_config(&config)?;
    let explorer = Explorer::new(store.clone(), providers.geocoder, providers.forecast, providers.search)
        .with_ttls(config.weather_ttl(), config.restaurant_ttl());

    let handler = handler::ExplorerServer::new(explorer);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    let reason = server.waiting().await?;
    tracing::info!(?reason, "server stopped");

    store.close().await?;

    Ok(())
}
