//! Session-token codec.
//!
//! Session tokens are HS256-signed JWTs carrying the owner's id and
//! username plus the standard issued-at/expiry claims. Signing and
//! verification both run against the single `SECRET_KEY`.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use mediavault_core::types::DbId;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the owning user's id.
    pub sub: DbId,
    /// The owner's username.
    pub user: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Signing configuration for session tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 24). Also used for the stored
    /// row's `expires_at`.
    pub token_ttl_hours: i64,
}

/// Default token lifetime in hours.
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

impl JwtConfig {
    /// Load signing configuration from the environment.
    ///
    /// Returns `None` when `SECRET_KEY` is unset or empty; the caller
    /// surfaces that as a per-request configuration error rather than a
    /// startup panic.
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var("SECRET_KEY").ok().filter(|s| !s.is_empty())?;

        let token_ttl_hours: i64 = std::env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_HOURS.to_string())
            .parse()
            .expect("TOKEN_TTL_HOURS must be a valid i64");

        Some(Self {
            secret,
            token_ttl_hours,
        })
    }
}

/// Sign a session token for the given user.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        user: username.to_string(),
        exp: now + config.token_ttl_hours * 3600,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token's signature and claim expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(data.claims)
}
