//! SQLite implementation of [`ItemStore`].
//!
//! [`SqliteStore`] persists items in a single `items` table keyed by
//! `(table_name, item_key)`, with each item serialized as JSON TEXT via
//! serde_json. The database uses WAL mode and embedded migrations.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;
use crate::expression::UpdateExpression;
use crate::traits::ItemStore;
use crate::types::{check_key, item_key, key_only_item, Item};

/// SQLite-backed implementation of [`ItemStore`].
///
/// `rusqlite::Connection` is `!Sync`, so it lives behind a `Mutex`; each
/// trait call holds the lock for exactly one statement or transaction.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Parses a stored JSON column back into an item.
    fn decode(json: &str) -> Result<Item, StorageError> {
        match serde_json::from_str::<serde_json::Value>(json)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(StorageError::IntegrityError {
                reason: format!("stored item is not a JSON object: {other}"),
            }),
        }
    }
}

const UPSERT_ITEM: &str = "INSERT INTO items (table_name, item_key, item_json) VALUES (?1, ?2, ?3)
     ON CONFLICT (table_name, item_key) DO UPDATE SET item_json = excluded.item_json";

impl ItemStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn scan(&self, table: &str) -> Result<Vec<Item>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT item_json FROM items WHERE table_name = ?1 ORDER BY item_key",
        )?;
        let rows = stmt.query_map(params![table], |row| row.get::<_, String>(0))?;
        let mut result = Vec::new();
        for row in rows {
            result.push(Self::decode(&row?)?);
        }
        Ok(result)
    }

    fn get(&self, table: &str, key: &str) -> Result<Option<Item>, StorageError> {
        check_key(key)?;
        let conn = self.conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT item_json FROM items WHERE table_name = ?1 AND item_key = ?2",
                params![table, key],
                |row| row.get(0),
            )
            .optional()?;
        json.as_deref().map(Self::decode).transpose()
    }

    fn put(&self, table: &str, item: Item) -> Result<(), StorageError> {
        let key = item_key(&item)?;
        let json = serde_json::to_string(&item)?;
        let conn = self.conn()?;
        conn.execute(UPSERT_ITEM, params![table, key, json])?;
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

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT item_json FROM items WHERE table_name = ?1 AND item_key = ?2",
                params![table, key],
                |row| row.get(0),
            )
            .optional()?;
        let mut item = match existing {
            Some(json) => Self::decode(&json)?,
            None => key_only_item(key),
        };

        resolved.apply(&mut item);

        let json = serde_json::to_string(&item)?;
        tx.execute(UPSERT_ITEM, params![table, key, json])?;
        tx.commit()?;
        Ok(item)
    }

    fn delete(&self, table: &str, key: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM items WHERE table_name = ?1 AND item_key = ?2",
            params![table, key],
        )?;
        Ok(())
    }

    fn shutdown(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }
}
