//! Handlers for the authentication routes (register, login, logout).

use std::sync::LazyLock;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use regex::Regex;
use serde::Deserialize;

use mediavault_core::error::CoreError;
use mediavault_db::models::CreateUser;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::TokenResponse;
use crate::state::AppState;

/// Email shape check, compiled once.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex must compile"));

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register`.
///
/// Fields are optional at the wire level so a missing one is reported by
/// name instead of as an opaque deserialization failure.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Create an account and return its first session token. The token is
/// signed and persisted only after the user insert is confirmed, so a
/// duplicate-user failure never leaks a usable token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let jwt = state.require_jwt()?;

    let username = require_field(input.user, "user")?;
    let email = require_field(input.email, "email")?;
    let password = require_field(input.password, "password")?;
    if !EMAIL_RE.is_match(&email) {
        return Err(AppError::Core(CoreError::Validation(
            "Not valid email.".into(),
        )));
    }

    let digest = hash_password(&password)
        .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))?;

    let user = state
        .store
        .insert_user(CreateUser {
            username,
            email,
            password_digest: digest,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    let token = state.ledger.issue(jwt, user.id, &user.username).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /login
///
/// Verify credentials and supersede any live session with a fresh token.
/// The login identifier matches either username or email.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let jwt = state.require_jwt()?;

    let login_id = require_field(input.user, "user")?;
    let password = require_field(input.password, "password")?;

    let user = state
        .store
        .find_user_by_login(&login_id)
        .await
        .ok_or_else(bad_credentials)?;

    let valid = verify_password(&password, &user.password_digest)
        .map_err(|e| CoreError::Internal(format!("password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::Core(bad_credentials()));
    }

    let token = state
        .ledger
        .login_or_refresh(jwt, user.id, &user.username)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /logout
///
/// Deliberately unimplemented; revocation exists in the ledger but this
/// route answers 501.
pub async fn logout() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Core(CoreError::Validation(format!(
            "'{name}' property missing."
        )))),
    }
}

/// One message for both unknown-user and wrong-password, so responses do
/// not reveal which accounts exist.
fn bad_credentials() -> CoreError {
    CoreError::Unauthorized("Invalid username or password".into())
}
