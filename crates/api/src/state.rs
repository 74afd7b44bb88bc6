use std::sync::Arc;

use mediavault_core::error::CoreError;
use mediavault_db::Store;

use crate::auth::jwt::JwtConfig;
use crate::auth::ledger::TokenLedger;
use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store and ledger share underlying records.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub ledger: TokenLedger,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig) -> Self {
        Self {
            ledger: TokenLedger::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }

    /// The signing configuration, or a `ServerConfig` error when
    /// `SECRET_KEY` was never provided.
    pub fn require_jwt(&self) -> Result<&JwtConfig, CoreError> {
        self.config
            .jwt
            .as_ref()
            .ok_or_else(|| CoreError::ServerConfig("SECRET_KEY is not configured".into()))
    }
}
