//! Binary entrypoint for the catalog HTTP server.
//!
//! See [`ServerConfig`] for the flags and `CATALOG_*` environment variables
//! it reads.

use clap::Parser;

use catalog_server::config::ServerConfig;
use catalog_server::lifecycle::{init_tracing, serve, shutdown_signal};
use catalog_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::parse();
    let state = AppState::from_config(&config)?;

    let addr = config.bind_address();
    tracing::info!(%addr, backend = state.store.backend_name(), "catalog server starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve(listener, state, shutdown_signal()).await?;

    tracing::info!("catalog server stopped");
    Ok(())
}
