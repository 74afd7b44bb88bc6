//! In-memory persistence store.
//!
//! All access goes through one `RwLock`; multi-step operations such as
//! [`Store::replace_tokens_for_owner`] hold the write guard for their whole
//! duration and are therefore atomic with respect to every other call.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use mediavault_core::media::MediaItem;
use mediavault_core::types::DbId;

use crate::error::StoreError;
use crate::models::{CreateUser, SessionToken, User};

#[derive(Default)]
struct Inner {
    users: HashMap<DbId, User>,
    /// Keyed by token value, which is globally unique.
    tokens: HashMap<String, SessionToken>,
    media: HashMap<DbId, MediaItem>,
}

/// The persistence service.
///
/// Cheaply cloneable; clones share the same underlying records.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Inner>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------

    /// Insert a new user. Usernames and emails are each globally unique;
    /// a clash fails the insert with [`StoreError::Duplicate`].
    pub async fn insert_user(&self, input: CreateUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::Duplicate { field: "username" });
        }
        if inner.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }

        let user = User {
            id: DbId::new_v4(),
            username: input.username,
            email: input.email,
            password_digest: input.password_digest,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Look up a user by login identifier: email first, then username.
    pub async fn find_user_by_login(&self, login: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .values()
            .find(|u| u.email == login)
            .or_else(|| inner.users.values().find(|u| u.username == login))
            .cloned()
    }

    pub async fn find_user_by_id(&self, id: DbId) -> Option<User> {
        self.inner.read().await.users.get(&id).cloned()
    }

    // -----------------------------------------------------------------
    // Session tokens
    // -----------------------------------------------------------------

    /// Insert a token row.
    pub async fn insert_token(&self, token: SessionToken) {
        let mut inner = self.inner.write().await;
        inner.tokens.insert(token.token_value.clone(), token);
    }

    /// Look up a token row by its raw value, expired or not. Expiry is the
    /// caller's concern; a row may legitimately outlive its `expires_at`
    /// until the next sweep runs.
    pub async fn find_token(&self, value: &str) -> Option<SessionToken> {
        self.inner.read().await.tokens.get(value).cloned()
    }

    /// Return a non-expired token owned by `owner`, if one exists.
    pub async fn find_active_token_by_owner(&self, owner: DbId) -> Option<SessionToken> {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .tokens
            .values()
            .find(|t| t.owner == owner && t.expires_at > now)
            .cloned()
    }

    /// Delete every token owned by `owner`, returning the count removed.
    pub async fn delete_tokens_by_owner(&self, owner: DbId) -> u64 {
        let mut inner = self.inner.write().await;
        let before = inner.tokens.len();
        inner.tokens.retain(|_, t| t.owner != owner);
        (before - inner.tokens.len()) as u64
    }

    /// Atomically replace the owner's tokens with `token`.
    ///
    /// Delete and insert happen under one write guard, so concurrent
    /// replacements for the same owner serialize and exactly one token
    /// survives.
    pub async fn replace_tokens_for_owner(&self, token: SessionToken) {
        let mut inner = self.inner.write().await;
        inner.tokens.retain(|_, t| t.owner != token.owner);
        inner.tokens.insert(token.token_value.clone(), token);
    }

    /// Delete expired token rows, returning the count removed.
    pub async fn sweep_expired_tokens(&self) -> u64 {
        let now = Utc::now();
        let mut inner = self.inner.write().await;
        let before = inner.tokens.len();
        inner.tokens.retain(|_, t| t.expires_at > now);
        (before - inner.tokens.len()) as u64
    }

    /// Spawn the background TTL sweep.
    ///
    /// The sweep is advisory: token expiry is re-checked at validation
    /// time, so a row that outlives its `expires_at` between ticks is
    /// still rejected.
    pub fn start_ttl_sweep(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = store.sweep_expired_tokens().await;
                if removed > 0 {
                    tracing::debug!(removed, "TTL sweep deleted expired session tokens");
                }
            }
        })
    }

    // -----------------------------------------------------------------
    // Media
    // -----------------------------------------------------------------

    pub async fn insert_media(&self, item: MediaItem) -> MediaItem {
        let mut inner = self.inner.write().await;
        inner.media.insert(item.id, item.clone());
        item
    }

    /// All items owned by `owner`, ordered by completion date then name so
    /// pagination windows are stable across calls.
    pub async fn media_by_owner(&self, owner: DbId) -> Vec<MediaItem> {
        let inner = self.inner.read().await;
        let mut items: Vec<MediaItem> = inner
            .media
            .values()
            .filter(|m| m.owner == owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.completed_date
                .cmp(&b.completed_date)
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    pub async fn find_media_by_id(&self, id: DbId) -> Option<MediaItem> {
        self.inner.read().await.media.get(&id).cloned()
    }

    /// Delete the item only when `owner` owns it, returning the deleted
    /// row. A mismatched owner behaves like an absent id.
    pub async fn delete_media_owned(&self, id: DbId, owner: DbId) -> Option<MediaItem> {
        let mut inner = self.inner.write().await;
        if inner.media.get(&id).is_some_and(|m| m.owner == owner) {
            inner.media.remove(&id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;
    use mediavault_core::media::{Language, MediaDraft, MediaType};

    fn create_user(name: &str) -> CreateUser {
        CreateUser {
            username: name.to_string(),
            email: format!("{name}@test.com"),
            password_digest: "$argon2id$fake".to_string(),
        }
    }

    fn token(owner: DbId, value: &str, ttl_hours: i64) -> SessionToken {
        let now = Utc::now();
        SessionToken {
            owner,
            token_value: value.to_string(),
            created_at: now,
            expires_at: now + ChronoDuration::hours(ttl_hours),
        }
    }

    fn media(owner: DbId, name: &str, date: &str) -> MediaItem {
        MediaDraft {
            name: Some(name.to_string()),
            completed_date: Some(date.to_string()),
            score: Some(7.0),
            poster: Some(format!("http://example.com/{name}.jpg")),
            media_type: Some("movie".to_string()),
            language: Some("english".to_string()),
            comment: None,
        }
        .into_item(owner)
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_rejected() {
        let store = Store::new();
        store.insert_user(create_user("ana")).await.unwrap();

        let err = store.insert_user(create_user("ana")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "username" }));

        let mut clash = create_user("other");
        clash.email = "ana@test.com".to_string();
        let err = store.insert_user(clash).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "email" }));
    }

    #[tokio::test]
    async fn test_find_user_by_login_matches_email_or_username() {
        let store = Store::new();
        let user = store.insert_user(create_user("ana")).await.unwrap();

        assert_eq!(store.find_user_by_login("ana").await.unwrap().id, user.id);
        assert_eq!(
            store.find_user_by_login("ana@test.com").await.unwrap().id,
            user.id
        );
        assert!(store.find_user_by_login("nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_replace_tokens_leaves_exactly_one() {
        let store = Store::new();
        let owner = DbId::new_v4();

        store.replace_tokens_for_owner(token(owner, "first", 24)).await;
        store.replace_tokens_for_owner(token(owner, "second", 24)).await;

        assert!(store.find_token("first").await.is_none());
        assert!(store.find_token("second").await.is_some());
        assert_eq!(
            store
                .find_active_token_by_owner(owner)
                .await
                .unwrap()
                .token_value,
            "second"
        );
    }

    #[tokio::test]
    async fn test_replace_does_not_touch_other_owners() {
        let store = Store::new();
        let a = DbId::new_v4();
        let b = DbId::new_v4();

        store.insert_token(token(a, "token-a", 24)).await;
        store.replace_tokens_for_owner(token(b, "token-b", 24)).await;

        assert!(store.find_token("token-a").await.is_some());
        assert!(store.find_token("token-b").await.is_some());
    }

    #[tokio::test]
    async fn test_expired_token_is_not_active_but_still_readable() {
        let store = Store::new();
        let owner = DbId::new_v4();
        store.insert_token(token(owner, "stale", -1)).await;

        // The row survives until the sweep, but it is never "active".
        assert!(store.find_token("stale").await.is_some());
        assert!(store.find_active_token_by_owner(owner).await.is_none());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired_tokens() {
        let store = Store::new();
        let owner = DbId::new_v4();
        store.insert_token(token(owner, "stale", -1)).await;
        store.insert_token(token(owner, "live", 24)).await;

        assert_eq!(store.sweep_expired_tokens().await, 1);
        assert!(store.find_token("stale").await.is_none());
        assert!(store.find_token("live").await.is_some());
    }

    #[tokio::test]
    async fn test_media_by_owner_is_scoped_and_ordered() {
        let store = Store::new();
        let ana = DbId::new_v4();
        let ben = DbId::new_v4();

        store.insert_media(media(ana, "Later", "2024-02-01")).await;
        store.insert_media(media(ana, "Earlier", "2023-01-01")).await;
        store.insert_media(media(ben, "Other", "2023-06-01")).await;

        let items = store.media_by_owner(ana).await;
        let names: Vec<&str> = items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Earlier", "Later"]);
        assert!(items.iter().all(|m| {
            m.media_type == MediaType::Movie && m.language == Language::English
        }));
    }

    #[tokio::test]
    async fn test_delete_media_is_owner_scoped() {
        let store = Store::new();
        let ana = DbId::new_v4();
        let ben = DbId::new_v4();
        let item = store.insert_media(media(ana, "Dune", "2023-02-10")).await;

        // The wrong owner cannot delete, and the row survives.
        assert!(store.delete_media_owned(item.id, ben).await.is_none());
        assert!(store.find_media_by_id(item.id).await.is_some());

        let deleted = store.delete_media_owned(item.id, ana).await.unwrap();
        assert_eq!(deleted.name, "Dune");
        assert!(store.find_media_by_id(item.id).await.is_none());
    }
}
