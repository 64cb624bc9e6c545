//! Product request/response types.
//!
//! Request bodies reuse the presence-tracking input types from catalog-core;
//! item-shaped responses are the raw stored items.

use serde::Serialize;

use catalog_core::Product;
use catalog_storage::Item;

use crate::error::ApiError;

/// Body of `POST /products`.
pub type CreateProductRequest = catalog_core::ProductDraft;

/// Body of `PUT`/`PATCH /products/{id}`.
pub type UpdateProductRequest = catalog_core::ProductPatch;

/// Plain confirmation body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Converts a validated product into the item written to the store.
pub fn product_item(product: &Product) -> Result<Item, ApiError> {
    match serde_json::to_value(product) {
        Ok(serde_json::Value::Object(item)) => Ok(item),
        Ok(other) => Err(ApiError::InternalError(format!(
            "product serialized to a non-object value: {other}"
        ))),
        Err(err) => Err(ApiError::InternalError(format!(
            "failed to serialize product: {err}"
        ))),
    }
}
