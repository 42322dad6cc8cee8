/// User upload API routes
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
use musify_core::{NewTrack, Track, TrackId, Visibility};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateVisibilityRequest {
    pub visibility: String,
}

/// GET /api/user-songs
/// Songs uploaded by the caller, any visibility
pub async fn list_user_songs(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.catalog.list_user_tracks(auth.user_id()).await?;
    Ok(Json(tracks))
}

/// POST /api/user-songs
pub async fn create_user_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<NewTrack>,
) -> Result<(StatusCode, Json<Track>)> {
    let track = app_state
        .catalog_service
        .create_user_track(&auth.0, req)
        .await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// PATCH /api/user-songs/:id
pub async fn update_visibility(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<UpdateVisibilityRequest>,
) -> Result<Json<Track>> {
    let visibility = Visibility::parse(&req.visibility)
        .ok_or_else(|| ServerError::BadRequest("Invalid visibility value".to_string()))?;

    let track = app_state
        .catalog_service
        .set_visibility(&auth.0, &TrackId::new(id), visibility)
        .await?;
    Ok(Json(track))
}

/// DELETE /api/user-songs/:id
pub async fn delete_user_song(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    app_state
        .catalog_service
        .delete_user_track(&auth.0, &TrackId::new(id))
        .await?;

    Ok(MessageResponse::json("Song deleted successfully"))
}
