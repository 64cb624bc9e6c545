//! Application state holding the injected item store.
//!
//! [`AppState`] is built once at startup and cloned into every handler. It
//! carries no mutable data of its own: all product state lives in the store,
//! and any synchronization the store needs happens inside it.

use std::sync::Arc;

use catalog_storage::{InMemoryStore, ItemStore, SqliteStore, StorageError};

use crate::config::{ServerConfig, StoreKind};

/// Name of the table holding products.
pub const PRODUCTS_TABLE: &str = "Products";

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The store client every handler talks to.
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    /// Wraps an already-constructed store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        AppState { store }
    }

    /// Opens the backend selected by `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StorageError> {
        let store: Arc<dyn ItemStore> = match config.store {
            StoreKind::Sqlite => Arc::new(SqliteStore::new(&config.db_path)?),
            StoreKind::Memory => Arc::new(InMemoryStore::new()),
        };
        Ok(AppState::new(store))
    }

    /// Creates a new `AppState` backed by an in-memory store (for testing).
    pub fn in_memory() -> Self {
        AppState::new(Arc::new(InMemoryStore::new()))
    }
}
