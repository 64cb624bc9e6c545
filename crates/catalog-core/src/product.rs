//! The [`Product`] entity and its creation/update input types.
//!
//! Presence is explicit: a field is missing only when it is absent (or JSON
//! `null`, which deserializes to `None`). A price of `0.0` and an empty name
//! are both present values. The one exception is the ID, which must be
//! non-blank because it becomes the store key.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A catalog product as persisted in the products table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Primary key.
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Declared by the managed schema; handlers never write it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Creates a product without a description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
        }
    }
}

/// Checks that a path-supplied ID is usable as a key.
pub fn require_id(id: &str) -> Result<&str, CoreError> {
    if id.trim().is_empty() {
        Err(CoreError::IdRequired)
    } else {
        Ok(id)
    }
}

/// Creation input as it arrives from a client: every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductDraft {
    /// Validates that `id`, `name` and `price` are all present.
    ///
    /// On failure the error lists every missing field, in declaration order.
    pub fn validate(self) -> Result<Product, CoreError> {
        let id = self.id.filter(|id| !id.trim().is_empty());

        match (id, self.name, self.price) {
            (Some(id), Some(name), Some(price)) => Ok(Product::new(id, name, price)),
            (id, name, price) => {
                let mut missing = Vec::new();
                if id.is_none() {
                    missing.push("id");
                }
                if name.is_none() {
                    missing.push("name");
                }
                if price.is_none() {
                    missing.push("price");
                }
                Err(CoreError::MissingFields { missing })
            }
        }
    }
}

/// Partial update input. Unsupplied fields are left untouched in the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ProductPatch {
    /// Returns true when neither field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// Rejects a patch that would change nothing.
    pub fn validate(self) -> Result<ProductPatch, CoreError> {
        if self.is_empty() {
            Err(CoreError::NoUpdateFields)
        } else {
            Ok(self)
        }
    }
}
