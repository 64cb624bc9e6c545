//! Runtime configuration for the catalog server.
//!
//! Every option can be given as a flag or through its `CATALOG_*`
//! environment variable; flags win.

use clap::{Parser, ValueEnum};

/// Which [`ItemStore`](catalog_storage::ItemStore) backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Persistent SQLite database at `--db-path`.
    Sqlite,
    /// Process-local store; contents are lost on exit.
    Memory,
}

/// Product catalog HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-server", version, about = "Product catalog HTTP server")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "CATALOG_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port.
    #[arg(long, env = "CATALOG_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Storage backend.
    #[arg(long, env = "CATALOG_STORE", value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    /// SQLite database file (ignored by the memory backend).
    #[arg(long, env = "CATALOG_DB_PATH", default_value = "catalog.db")]
    pub db_path: String,
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
