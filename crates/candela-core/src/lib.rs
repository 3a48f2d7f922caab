//! Core domain layer for the Candela storefront backend.
//!
//! Holds the document store abstraction, the persisted record types, and the
//! services the HTTP layer exposes: catalog, best-selling curation, orders
//! (with the batch-checkout duplicate guard), accounts, and blog content.
//! Everything HTTP-specific lives in `candela-server`.

pub mod auth;
pub mod error;
pub mod model;
pub mod services;
pub mod store;

pub use error::{ServiceError, ServiceResult};
