//! Storage-layer item representation.
//!
//! An [`Item`] is a JSON object of attribute name to value. Every table is
//! keyed by the string attribute [`KEY_ATTRIBUTE`].

use serde_json::Value;

use crate::error::StorageError;

/// A single stored record.
pub type Item = serde_json::Map<String, Value>;

/// Name of the primary key attribute shared by all tables.
pub const KEY_ATTRIBUTE: &str = "id";

/// Rejects empty keys before they reach a backend.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::validation(
            "the key attribute must be a non-empty string",
        ));
    }
    Ok(())
}

/// Extracts and checks the key of an item about to be written.
pub(crate) fn item_key(item: &Item) -> Result<&str, StorageError> {
    match item.get(KEY_ATTRIBUTE) {
        Some(Value::String(key)) => {
            check_key(key)?;
            Ok(key)
        }
        Some(_) => Err(StorageError::validation(format!(
            "key attribute '{KEY_ATTRIBUTE}' must be a string"
        ))),
        None => Err(StorageError::validation(format!(
            "item is missing key attribute '{KEY_ATTRIBUTE}'"
        ))),
    }
}

/// Creates the skeleton record an upsert starts from.
pub(crate) fn key_only_item(key: &str) -> Item {
    let mut item = Item::new();
    item.insert(KEY_ATTRIBUTE.to_string(), Value::String(key.to_string()));
    item
}
