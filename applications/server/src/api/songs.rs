/// Catalog API routes
use crate::{
    error::{Result, ServerError},
    middleware::{AdminUser, AuthenticatedUser},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use musify_core::{AssetKind, NewTrack, StoredAsset, Track, TrackId, TrackScope};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListSongsQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub ext: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteSongResponse {
    pub message: String,
    pub deleted_song: Track,
}

/// GET /api/songs?genre=
/// List public songs, optionally restricted to one genre
pub async fn list_songs(
    State(app_state): State<AppState>,
    Query(query): Query<ListSongsQuery>,
) -> Result<Json<Vec<Track>>> {
    let scope = match query.genre.map(|g| g.trim().to_string()) {
        Some(genre) if !genre.is_empty() => TrackScope::Genre(genre),
        _ => TrackScope::All,
    };
    let tracks = app_state.catalog.list_tracks(&scope).await?;
    Ok(Json(tracks))
}

/// GET /api/songs/search?q=
pub async fn search_songs(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.catalog.search_tracks(&query.q).await?;
    Ok(Json(tracks))
}

/// GET /api/songs/:id
/// A private song is reported missing to everyone but its owner
pub async fn get_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    viewer: Option<AuthenticatedUser>,
) -> Result<Json<Track>> {
    let viewer = viewer.as_ref().map(AuthenticatedUser::user_id);
    let track = app_state
        .catalog
        .get_track(&TrackId::new(id))
        .await?
        .filter(|track| track.is_visible_to(viewer))
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;

    Ok(Json(track))
}

/// POST /api/songs
/// Add a catalog song (admin only)
pub async fn create_song(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<NewTrack>,
) -> Result<(StatusCode, Json<Track>)> {
    let track = app_state.catalog_service.create_track(req).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// DELETE /api/songs/:id
/// Delete a song and its audio and cover files (admin only)
pub async fn delete_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<DeleteSongResponse>> {
    let track = app_state
        .catalog_service
        .delete_track(&TrackId::new(id))
        .await?;

    Ok(Json(DeleteSongResponse {
        message: "Song deleted successfully".to_string(),
        deleted_song: track,
    }))
}

/// POST /api/songs/upload/:kind?ext=
/// Store a raw audio or cover file (admin only)
pub async fn upload_asset(
    Path(kind): Path<String>,
    Query(query): Query<UploadQuery>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredAsset>)> {
    let kind = AssetKind::parse(&kind)
        .ok_or_else(|| ServerError::BadRequest(format!("Unknown asset kind: {kind}")))?;

    let stored = app_state
        .catalog_service
        .upload(kind, &body, &query.ext)
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}
