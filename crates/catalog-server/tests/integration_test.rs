//! End-to-end integration tests for the catalog HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! ItemStore -> HTTP response. Requests are sent with
//! `tower::ServiceExt::oneshot` directly to the router, without a network
//! listener.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use catalog_server::router::build_router;
use catalog_server::state::{AppState, PRODUCTS_TABLE};
use catalog_storage::{
    InMemoryStore, Item, ItemStore, SqliteStore, StorageError, UpdateExpression,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    build_router(AppState::in_memory())
}

/// Store double whose every call fails.
struct FailingStore;

impl ItemStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    fn scan(&self, _table: &str) -> Result<Vec<Item>, StorageError> {
        Err(StorageError::Poisoned)
    }

    fn get(&self, _table: &str, _key: &str) -> Result<Option<Item>, StorageError> {
        Err(StorageError::Poisoned)
    }

    fn put(&self, _table: &str, _item: Item) -> Result<(), StorageError> {
        Err(StorageError::Poisoned)
    }

    fn update(
        &self,
        _table: &str,
        _key: &str,
        _expression: &UpdateExpression,
    ) -> Result<Item, StorageError> {
        Err(StorageError::Poisoned)
    }

    fn delete(&self, _table: &str, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Poisoned)
    }
}

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::GET, path, None).await
}

async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::POST, path, Some(body)).await
}

async fn put_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::PUT, path, Some(body)).await
}

async fn delete_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    request_json(app, Method::DELETE, path, None).await
}

async fn create(app: &Router, id: &str, name: &str, price: f64) {
    let (status, body) = post_json(
        app,
        "/products",
        json!({ "id": id, "name": name, "price": price }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body:?}");
}

// ---------------------------------------------------------------------------
// Lifecycle scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_product_lifecycle() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/products",
        json!({ "id": "p1", "name": "Widget", "price": 9.99 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "p1", "name": "Widget", "price": 9.99 }));

    let (status, body) = get_json(&app, "/products/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "p1", "name": "Widget", "price": 9.99 }));

    let (status, body) = put_json(&app, "/products/p1", json!({ "price": 12.5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "p1", "name": "Widget", "price": 12.5 }));

    let (status, body) = delete_json(&app, "/products/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Product deleted" }));

    let (status, body) = get_json(&app, "/products/p1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn lifecycle_against_sqlite_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    let store = SqliteStore::new(path.to_str().unwrap()).unwrap();
    let app = build_router(AppState::new(Arc::new(store)));

    create(&app, "p1", "Widget", 9.99).await;
    let (status, body) = request_json(
        &app,
        Method::PATCH,
        "/products/p1",
        Some(json!({ "name": "Gadget" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "p1", "name": "Gadget", "price": 9.99 }));

    let (status, body) = get_json(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": "p1", "name": "Gadget", "price": 9.99 }]));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_starts_empty() {
    let app = test_app();
    let (status, body) = get_json(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_returns_every_product() {
    let app = test_app();
    create(&app, "a", "Apple", 1.0).await;
    create(&app, "b", "Banana", 2.0).await;

    let (status, body) = get_json(&app, "/products").await;
    assert_eq!(status, StatusCode::OK);

    let mut ids: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn list_returns_raw_items_including_description() {
    let store = Arc::new(InMemoryStore::new());
    let item = match json!({ "id": "d1", "name": "Desk", "price": 80, "description": "oak" }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    store.put(PRODUCTS_TABLE, item).unwrap();
    let app = build_router(AppState::new(store));

    let (_, body) = get_json(&app, "/products").await;
    assert_eq!(body[0]["description"], "oak");
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unknown_product_is_404() {
    let app = test_app();
    let (status, body) = get_json(&app, "/products/never-written").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn blank_id_is_rejected() {
    let app = test_app();

    let (status, body) = get_json(&app, "/products/%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID is required");

    let (status, body) = put_json(&app, "/products/%20", json!({ "price": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID is required");

    let (status, body) = delete_json(&app, "/products/%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "ID is required");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_requires_all_fields() {
    let app = test_app();

    let (status, body) =
        post_json(&app, "/products", json!({ "id": "p1", "name": "Widget" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields (id, name, price) are required");
    assert_eq!(body["details"]["missing"], json!(["price"]));

    let (status, body) = post_json(&app, "/products", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["missing"], json!(["id", "name", "price"]));

    let (status, _) = post_json(
        &app,
        "/products",
        json!({ "id": "p1", "name": null, "price": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing reached the store.
    let (_, body) = get_json(&app, "/products").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_accepts_zero_price() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/products",
        json!({ "id": "free", "name": "Sample", "price": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], json!(0.0));

    let (status, body) = get_json(&app, "/products/free").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(0.0));
}

#[tokio::test]
async fn create_overwrites_existing_product() {
    let app = test_app();
    create(&app, "p1", "Widget", 9.99).await;
    create(&app, "p1", "Replacement", 1.0).await;

    let (_, body) = get_json(&app, "/products/p1").await;
    assert_eq!(body, json!({ "id": "p1", "name": "Replacement", "price": 1.0 }));
}

#[tokio::test]
async fn create_ignores_unknown_body_fields() {
    let app = test_app();
    let (status, _) = post_json(
        &app,
        "/products",
        json!({ "id": "p1", "name": "Widget", "price": 3, "description": "ignored" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&app, "/products/p1").await;
    assert_eq!(body, json!({ "id": "p1", "name": "Widget", "price": 3.0 }));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/products",
        json!({ "id": "p1", "name": "Widget", "price": "cheap" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/products")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_name_only_keeps_price() {
    let app = test_app();
    create(&app, "p1", "Widget", 9.99).await;

    let (status, body) = put_json(&app, "/products/p1", json!({ "name": "Gadget" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "p1", "name": "Gadget", "price": 9.99 }));
}

#[tokio::test]
async fn update_without_fields_is_rejected() {
    let app = test_app();
    create(&app, "p1", "Widget", 9.99).await;

    let (status, body) = put_json(&app, "/products/p1", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "At least one field (name or price) must be provided"
    );

    let (_, body) = get_json(&app, "/products/p1").await;
    assert_eq!(body, json!({ "id": "p1", "name": "Widget", "price": 9.99 }));
}

#[tokio::test]
async fn update_preserves_description() {
    let store = Arc::new(InMemoryStore::new());
    let item = match json!({ "id": "d1", "name": "Desk", "price": 80.0, "description": "oak" }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    store.put(PRODUCTS_TABLE, item).unwrap();
    let app = build_router(AppState::new(store));

    let (status, body) = put_json(&app, "/products/d1", json!({ "price": 95.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": "d1", "name": "Desk", "price": 95.0, "description": "oak" })
    );
}

#[tokio::test]
async fn update_of_missing_product_creates_partial_record() {
    let app = test_app();

    let (status, body) = put_json(&app, "/products/ghost", json!({ "price": 5.0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "ghost", "price": 5.0 }));

    let (status, _) = get_json(&app, "/products/ghost").await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_of_missing_product_succeeds() {
    let app = test_app();
    let (status, body) = delete_json(&app, "/products/nothing-here").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted");
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failures_map_to_500() {
    let app = build_router(AppState::new(Arc::new(FailingStore)));

    let (status, body) = get_json(&app, "/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch products");
    assert!(body.get("error").is_none());

    let (status, body) = get_json(&app, "/products/p1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    assert_eq!(body["error"], "storage lock poisoned");

    let (status, body) = post_json(
        &app,
        "/products",
        json!({ "id": "p1", "name": "Widget", "price": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");

    let (status, _) = put_json(&app, "/products/p1", json!({ "name": "x" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = delete_json(&app, "/products/p1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn validation_runs_before_the_store() {
    let app = build_router(AppState::new(Arc::new(FailingStore)));

    let (status, _) = post_json(&app, "/products", json!({ "id": "p1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put_json(&app, "/products/p1", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
