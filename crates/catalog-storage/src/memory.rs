//! In-memory implementation of [`ItemStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and for running the
//! service without a database file. It has the same semantics as the SQLite
//! backend.

use dashmap::DashMap;

use crate::error::StorageError;
use crate::expression::UpdateExpression;
use crate::traits::ItemStore;
use crate::types::{check_key, item_key, key_only_item, Item};

/// Items keyed by `(table, key)`.
///
/// Backed by `DashMap`, so each update's read-modify-write happens under the
/// entry's shard lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: DashMap<(String, String), Item>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            items: DashMap::new(),
        }
    }

    /// Number of items across all tables.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn scan(&self, table: &str) -> Result<Vec<Item>, StorageError> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.key().0 == table)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StorageError> {
        check_key(key)?;
        Ok(self
            .items
            .get(&(table.to_string(), key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    fn put(&self, table: &str, item: Item) -> Result<(), StorageError> {
        let key = item_key(&item)?.to_string();
        self.items.insert((table.to_string(), key), item);
        Ok(())
    }

    fn update(
        &self,
        table: &str,
        key: &str,
        expression: &UpdateExpression,
    ) -> Result<Item, StorageError> {
        check_key(key)?;
        let resolved = expression.resolve()?;

        let mut entry = self
            .items
            .entry((table.to_string(), key.to_string()))
            .or_insert_with(|| key_only_item(key));
        resolved.apply(entry.value_mut());
        Ok(entry.value().clone())
    }

    fn delete(&self, table: &str, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.items.remove(&(table.to_string(), key.to_string()));
        Ok(())
    }
}
