//! HTTP/JSON API server for the product catalog.
//!
//! Maps each REST verb on `/products` to exactly one [`ItemStore`] call. This
//! crate contains the request handlers, API schema types, error mapping,
//! runtime configuration and route definitions.
//!
//! [`ItemStore`]: catalog_storage::ItemStore

pub mod config;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod router;
pub mod schema;
pub mod state;
