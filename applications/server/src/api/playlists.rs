/// Playlists API routes
use crate::{
    api::MessageResponse,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use musify_core::{Playlist, PlaylistId, Track, TrackId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub song_id: String,
}

/// GET /api/playlists
/// The caller's playlists, default playlist first
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state.playlists.list_playlists(auth.user_id()).await?;
    Ok(Json(playlists))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let playlist = app_state
        .playlists
        .create_playlist(auth.user_id(), &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// DELETE /api/playlists/:id
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    app_state
        .playlists
        .delete_playlist(auth.user_id(), &PlaylistId::new(id))
        .await?;
    Ok(MessageResponse::json("Playlist deleted successfully"))
}

/// GET /api/playlists/:id/songs
/// Songs of a playlist in the order they were added
///
/// Private songs are listed only when the caller owns them.
pub async fn list_playlist_songs(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    viewer: Option<AuthenticatedUser>,
) -> Result<Json<Vec<Track>>> {
    let id = PlaylistId::new(id);
    app_state
        .playlists
        .get_playlist(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))?;

    let tracks = app_state.playlists.playlist_tracks(&id, viewer.as_ref().map(AuthenticatedUser::user_id))
        .await?;
    Ok(Json(tracks))
}

/// POST /api/playlists/:id/songs
pub async fn add_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<AddSongRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    if req.song_id.trim().is_empty() {
        return Err(ServerError::BadRequest("song_id is required".to_string()));
    }

    app_state
        .playlists
        .add_track(
            auth.user_id(),
            &PlaylistId::new(id),
            &TrackId::new(req.song_id),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::json("Song added to playlist"),
    ))
}

/// DELETE /api/playlists/:id/songs/:song_id
pub async fn remove_song(
    Path((id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    app_state
        .playlists
        .remove_track(
            auth.user_id(),
            &PlaylistId::new(id),
            &TrackId::new(song_id),
        )
        .await?;
    Ok(MessageResponse::json("Song removed from playlist"))
}
