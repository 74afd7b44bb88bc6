//! Session-token ledger: the single-active-token policy.
//!
//! Expiry is tracked twice, deliberately: in the signed claims and on the
//! stored row. The store's TTL sweep is advisory -- every ledger lookup
//! re-checks `expires_at` so a row read before the sweep runs is still
//! rejected.

use chrono::{Duration, Utc};

use mediavault_core::error::CoreError;
use mediavault_core::types::DbId;
use mediavault_db::models::SessionToken;
use mediavault_db::Store;

use crate::auth::jwt::{self, JwtConfig};

/// Enforces at most one live session token per owner.
#[derive(Clone)]
pub struct TokenLedger {
    store: Store,
}

impl TokenLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Sign and persist a fresh token for `user_id`, returning its raw
    /// value.
    ///
    /// Callers must only invoke this once the owning user record is
    /// durable; registration issues its token after the insert returns, so
    /// a failed create never leaks a signed token.
    pub async fn issue(
        &self,
        config: &JwtConfig,
        user_id: DbId,
        username: &str,
    ) -> Result<String, CoreError> {
        let token = self.sign(config, user_id, username)?;
        self.store.insert_token(token.clone()).await;
        Ok(token.token_value)
    }

    /// True when a non-expired token exists for `user_id`.
    pub async fn has_active(&self, user_id: DbId) -> bool {
        self.store.find_active_token_by_owner(user_id).await.is_some()
    }

    /// Look up a token row by its raw value, rejecting an expired one.
    ///
    /// Expiry is compared here as well as in the signed claims; the TTL
    /// sweep may lag behind a row's logical expiry.
    pub async fn find_live(&self, value: &str) -> Option<SessionToken> {
        self.store
            .find_token(value)
            .await
            .filter(|t| t.expires_at > Utc::now())
    }

    /// Delete every token owned by `user_id`, returning the count removed.
    pub async fn revoke_all(&self, user_id: DbId) -> u64 {
        self.store.delete_tokens_by_owner(user_id).await
    }

    /// Issue a fresh token, superseding any live one.
    ///
    /// Delete-then-insert runs atomically inside the store, so two
    /// concurrent logins for the same user serialize and exactly one live
    /// token survives. A check-then-act sequence over [`Self::has_active`]
    /// and [`Self::revoke_all`] would race; the login path never does that.
    pub async fn login_or_refresh(
        &self,
        config: &JwtConfig,
        user_id: DbId,
        username: &str,
    ) -> Result<String, CoreError> {
        let token = self.sign(config, user_id, username)?;
        self.store.replace_tokens_for_owner(token.clone()).await;
        Ok(token.token_value)
    }

    fn sign(
        &self,
        config: &JwtConfig,
        user_id: DbId,
        username: &str,
    ) -> Result<SessionToken, CoreError> {
        let value = jwt::generate_token(user_id, username, config)
            .map_err(|e| CoreError::Internal(format!("token generation failed: {e}")))?;
        let now = Utc::now();
        Ok(SessionToken {
            owner: user_id,
            token_value: value,
            created_at: now,
            expires_at: now + Duration::hours(config.token_ttl_hours),
        })
    }
}
