//! The [`ItemStore`] trait defining the table contract.
//!
//! Every method is a single round-trip against one table. There are no
//! conditional writes: `put` overwrites, `update` upserts, and `delete` of a
//! missing key succeeds. Concurrent writers to the same key race and the
//! last one wins.
//!
//! Backends are `Send + Sync` so one instance can be shared behind an `Arc`
//! by every request handler; any locking a backend needs is internal to it.

use crate::error::StorageError;
use crate::expression::UpdateExpression;
use crate::types::Item;

/// The storage contract for keyed item tables.
pub trait ItemStore: Send + Sync {
    /// Short backend identifier for logs.
    fn backend_name(&self) -> &'static str;

    /// Returns every item in `table`. Order is backend-defined.
    ///
    /// A table that has never been written to scans as empty.
    fn scan(&self, table: &str) -> Result<Vec<Item>, StorageError>;

    /// Point lookup by key.
    fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StorageError>;

    /// Stores `item` under its key attribute, replacing any existing item.
    fn put(&self, table: &str, item: Item) -> Result<(), StorageError>;

    /// Applies `expression` to the item at `key` and returns the item as it
    /// is after the update.
    ///
    /// A missing item is created from just its key before the expression is
    /// applied.
    fn update(
        &self,
        table: &str,
        key: &str,
        expression: &UpdateExpression,
    ) -> Result<Item, StorageError>;

    /// Removes the item at `key`, if any.
    fn delete(&self, table: &str, key: &str) -> Result<(), StorageError>;

    /// Flushes backend state before the process exits.
    fn shutdown(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
