pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /register            create account (public)
/// /login               exchange credentials for a token (public)
/// /logout              deliberately unimplemented (501)
///
/// /media               list with filters + pagination (bearer token)
/// /media/addMedia      add one item, or an array with ?many=true
/// /media/{id}          get / delete by id (owner-scoped)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/media", get(handlers::media::list_media))
        .route("/media/addMedia", post(handlers::media::add_media))
        .route(
            "/media/{id}",
            get(handlers::media::get_media).delete(handlers::media::delete_media),
        )
}
