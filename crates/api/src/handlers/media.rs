//! Handlers for the `/media` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use mediavault_core::error::CoreError;
use mediavault_core::filter::filter_media;
use mediavault_core::media::{MediaDraft, MediaItem};
use mediavault_core::paginate::paginate;
use mediavault_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{AddMediaParams, MediaListParams};
use crate::response::PagedResponse;
use crate::state::AppState;

/// GET /media
///
/// List the authenticated user's items with optional filters and
/// pagination. An empty filter set returns the whole collection; a filter
/// set that matches nothing returns an empty page. The distinction comes
/// from the engine's no-filter sentinel.
pub async fn list_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<MediaListParams>,
) -> AppResult<Json<PagedResponse<MediaItem>>> {
    let items = state.store.media_by_owner(auth.user_id).await;

    let filtered = filter_media(&items, &params.filter_spec())?;
    let visible = filtered.as_deref().unwrap_or(&items);

    let (window, meta) = paginate(visible, params.page.unwrap_or(1));
    Ok(Json(PagedResponse {
        page: meta,
        data: window,
    }))
}

/// POST /media/addMedia
///
/// Add one item, or an array of items when `?many=true`. Every draft in a
/// batch is validated before any insert, so one bad element rejects the
/// whole batch without partial writes.
pub async fn add_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AddMediaParams>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if params.many {
        let drafts: Vec<MediaDraft> = parse_body(body)?;
        let mut items = Vec::with_capacity(drafts.len());
        for draft in drafts {
            items.push(draft.into_item(auth.user_id)?);
        }

        let mut saved = Vec::with_capacity(items.len());
        for item in items {
            saved.push(state.store.insert_media(item).await);
        }
        Ok((StatusCode::CREATED, Json(to_json(&saved)?)))
    } else {
        let draft: MediaDraft = parse_body(body)?;
        let saved = state.store.insert_media(draft.into_item(auth.user_id)?).await;
        Ok((StatusCode::CREATED, Json(to_json(&saved)?)))
    }
}

/// GET /media/{id}
///
/// A malformed id is indistinguishable from an absent one: both answer
/// 404, as does an id owned by another user.
pub async fn get_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MediaItem>> {
    let id = parse_media_id(&id)?;
    let item = state
        .store
        .find_media_by_id(id)
        .await
        .filter(|item| item.owner == auth.user_id)
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// DELETE /media/{id}
///
/// Returns the deleted item. Owner-scoped like the read path.
pub async fn delete_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MediaItem>> {
    let id = parse_media_id(&id)?;
    let deleted = state
        .store
        .delete_media_owned(id, auth.user_id)
        .await
        .ok_or_else(|| not_found(id))?;
    Ok(Json(deleted))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Invalid media payload: {e}"))))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Core(CoreError::Internal(format!("response encoding failed: {e}"))))
}

/// Ids that fail to parse are treated as lookups that missed, not as
/// validation errors.
fn parse_media_id(raw: &str) -> Result<DbId, AppError> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Core(CoreError::NotFound(format!("media '{raw}' not found"))))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound(format!("media '{id}' not found")))
}
