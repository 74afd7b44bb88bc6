//! Domain types and pure logic for the MediaVault backend.
//!
//! Everything in this crate is synchronous and I/O-free: the media model
//! and its validation, the filter engine, and the paginator. Persistence
//! and transport live in `mediavault-db` and `mediavault-api`.

pub mod error;
pub mod filter;
pub mod media;
pub mod paginate;
pub mod types;
