//! Persistence service for MediaVault.
//!
//! Record CRUD by entity behind an in-memory store. Uniqueness and token
//! TTL expiry are explicit contracts of [`Store`] rather than properties of
//! any particular storage engine.

pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use store::Store;
