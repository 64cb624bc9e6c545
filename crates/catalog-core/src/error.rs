//! Core error types for catalog-core.
//!
//! Every variant is a presence-check failure on client input; none of them
//! originate from storage.

use thiserror::Error;

/// Validation errors produced before a request reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product ID was absent or blank.
    #[error("ID is required")]
    IdRequired,

    /// A creation request was missing one or more of `id`, `name`, `price`.
    #[error("All fields (id, name, price) are required")]
    MissingFields { missing: Vec<&'static str> },

    /// An update request supplied neither `name` nor `price`.
    #[error("At least one field (name or price) must be provided")]
    NoUpdateFields,
}
