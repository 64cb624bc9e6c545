//! Product CRUD handlers (list, get, create, update, delete).
//!
//! Each handler issues exactly one store call against [`PRODUCTS_TABLE`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::{debug, error};

use catalog_core::{require_id, Product, ProductPatch};
use catalog_storage::{Item, StorageError, UpdateExpression};

use crate::error::ApiError;
use crate::schema::products::{
    product_item, CreateProductRequest, MessageResponse, UpdateProductRequest,
};
use crate::state::{AppState, PRODUCTS_TABLE};

/// Logs a failed store call and wraps it for the client.
fn store_failure<'a>(
    operation: &'static str,
    id: &'a str,
) -> impl FnOnce(StorageError) -> ApiError + 'a {
    move |err| {
        error!(operation, id, error = %err, "product store call failed");
        ApiError::store(err)
    }
}

/// Builds the SET expression for the supplied patch fields.
///
/// `name` is a reserved word in the expression language, so it always goes
/// through the `#name` alias.
pub fn patch_expression(patch: &ProductPatch) -> UpdateExpression {
    let mut expression = UpdateExpression::new();
    if let Some(name) = &patch.name {
        expression =
            expression.set_aliased("#name", "name", ":name", Value::String(name.clone()));
    }
    if let Some(price) = patch.price {
        expression = expression.set("price", ":price", Value::from(price));
    }
    expression
}

/// Lists every product.
///
/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.scan(PRODUCTS_TABLE).map_err(|err| {
        error!(error = %err, "failed to fetch products");
        ApiError::InternalError("Failed to fetch products".to_string())
    })?;
    Ok(Json(items))
}

/// Fetches one product.
///
/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = require_id(&id)?;
    let item = state
        .store
        .get(PRODUCTS_TABLE, id)
        .map_err(store_failure("get", id))?;

    match item {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound("Product not found".to_string())),
    }
}

/// Creates (or silently replaces) a product.
///
/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(draft) = payload?;
    let product = draft.validate()?;
    let item = product_item(&product)?;

    state
        .store
        .put(PRODUCTS_TABLE, item)
        .map_err(store_failure("put", &product.id))?;

    debug!(id = %product.id, "product stored");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Updates only the supplied fields of a product, returning the full item.
///
/// `PUT /products/{id}` and `PATCH /products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = require_id(&id)?;
    let Json(patch) = payload?;
    let patch = patch.validate()?;

    let expression = patch_expression(&patch);
    debug!(id, expression = %expression.render(), "updating product");

    let item = state
        .store
        .update(PRODUCTS_TABLE, id, &expression)
        .map_err(store_failure("update", id))?;
    Ok(Json(item))
}

/// Deletes a product. Deleting a missing product still succeeds.
///
/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;
    state
        .store
        .delete(PRODUCTS_TABLE, id)
        .map_err(store_failure("delete", id))?;
    Ok(Json(MessageResponse::new("Product deleted")))
}
