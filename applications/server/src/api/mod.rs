/// API route modules
pub mod comments;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod user_songs;
pub mod users;

use crate::{middleware, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    Json,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the `/api` router
///
/// Every route sees the identity middleware; handlers that need a caller
/// take `AuthenticatedUser` or `AdminUser`.
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Catalog
        .route("/songs", get(songs::list_songs).post(songs::create_song))
        .route("/songs/search", get(songs::search_songs))
        .route("/songs/:id", get(songs::get_song).delete(songs::delete_song))
        .route(
            "/songs/upload/:kind",
            post(songs::upload_asset).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // User uploads
        .route(
            "/user-songs",
            get(user_songs::list_user_songs).post(user_songs::create_user_song),
        )
        .route(
            "/user-songs/:id",
            patch(user_songs::update_visibility).delete(user_songs::delete_user_song),
        )
        // Users
        .route("/users/register", post(users::register))
        // Playlists
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route("/playlists/:id", delete(playlists::delete_playlist))
        .route(
            "/playlists/:id/songs",
            get(playlists::list_playlist_songs).post(playlists::add_song),
        )
        .route(
            "/playlists/:id/songs/:song_id",
            delete(playlists::remove_song),
        )
        // Comments
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/comments/:id", delete(comments::delete_comment))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::identity_middleware,
        ));

    Router::new()
        .nest("/api", routes)
        .with_state(app_state)
}
