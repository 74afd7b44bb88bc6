//! Request-gating extractor for protected routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mediavault_core::error::CoreError;
use mediavault_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user attached to a protected request.
///
/// Extraction runs a strict four-step gate, short-circuiting on the first
/// failure:
///
/// 1. the signing secret must be configured (500 otherwise),
/// 2. an `Authorization: Bearer <token>` header must be present (401),
/// 3. the token must exist in the ledger and be unexpired (401),
/// 4. the signature and claim expiry must verify (401).
///
/// Both 3 and 4 are required: the ledger check lets the server invalidate a
/// session before its cryptographic expiry, and the signature check lets a
/// token self-expire when its row outlives the TTL sweep. The checks never
/// reorder; later steps assume earlier ones passed.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. ConfigCheck.
        let jwt = state.require_jwt()?;

        // 2. PresenceCheck.
        let header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthenticated("Auth token required"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthenticated("Invalid Authorization format. Expected: Bearer <token>"))?;

        // 3. LedgerCheck. The ledger re-checks row expiry, so a row the
        //    TTL sweep has not removed yet is still rejected.
        state
            .ledger
            .find_live(token)
            .await
            .ok_or_else(|| unauthenticated("Auth token not valid"))?;

        // 4. SignatureCheck.
        let claims = validate_token(token, jwt)
            .map_err(|_| unauthenticated("Auth token not valid"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.user,
        })
    }
}

fn unauthenticated(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
