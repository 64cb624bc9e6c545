//! Domain model for the product catalog.
//!
//! Holds the [`Product`] entity and the request-shaped types that turn
//! partially-filled input into validated values before anything touches a
//! store.

pub mod error;
pub mod product;

pub use error::CoreError;
pub use product::{require_id, Product, ProductDraft, ProductPatch};
