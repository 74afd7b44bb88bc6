//! Persistent record types and their create DTOs.

use mediavault_core::types::{DbId, Timestamp};

/// A registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    /// PHC-formatted password digest. Never leaves the backend.
    pub password_digest: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_digest: String,
}

/// A stored session token.
///
/// `token_value` is globally unique. The at-most-one-live-token-per-owner
/// policy is enforced by the ledger through
/// [`Store::replace_tokens_for_owner`](crate::Store::replace_tokens_for_owner),
/// not by a uniqueness constraint here.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub owner: DbId,
    pub token_value: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}
