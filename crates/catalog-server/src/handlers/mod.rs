//! HTTP handler modules for the catalog API.
//!
//! Handlers are thin: validate input, issue one store call, shape the
//! response.

pub mod products;
