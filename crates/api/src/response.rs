//! Shared response envelope types for API handlers.

use serde::Serialize;

use mediavault_core::paginate::PageMeta;

/// `{ "token": ... }` envelope returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `{ "page": ..., "data": [...] }` envelope returned by the media listing.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub page: PageMeta,
    pub data: Vec<T>,
}
