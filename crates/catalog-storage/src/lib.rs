//! Key-value item storage for the product catalog.
//!
//! Provides the [`ItemStore`] trait defining the table contract the HTTP
//! layer depends on, plus [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: Item alias and key helpers
//! - [`expression`]: SET-style partial update expressions
//! - [`traits`]: ItemStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod expression;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::StorageError;
pub use expression::{is_reserved_word, UpdateExpression};
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::ItemStore;
pub use types::{Item, KEY_ATTRIBUTE};
