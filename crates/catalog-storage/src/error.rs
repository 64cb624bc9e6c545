//! Storage error types for catalog-storage.
//!
//! [`StorageError`] covers backend failures (SQLite, migrations, poisoned
//! locks), corrupt stored data, and requests the store refuses to run.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization of an item failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The SQLite backend reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying embedded schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// The store rejected the request itself (bad key, bad expression).
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// A stored record could not be interpreted as an item.
    #[error("integrity error: {reason}")]
    IntegrityError { reason: String },

    /// A thread panicked while holding the backend lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        StorageError::Validation {
            reason: reason.into(),
        }
    }
}
