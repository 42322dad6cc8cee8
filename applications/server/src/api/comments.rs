/// Comments API routes
use crate::{
    api::MessageResponse,
    error::Result,
    middleware::{AdminUser, AuthenticatedUser},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use musify_core::{Comment, CommentId, NewComment, TrackId};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub song_id: String,
    pub text: String,
}

/// GET /api/comments
/// Recent comments keyed by song id, newest first
pub async fn list_comments(
    State(app_state): State<AppState>,
) -> Result<Json<HashMap<TrackId, Vec<Comment>>>> {
    let comments = app_state.comments.list_comments().await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create_comment(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let comment = app_state
        .comments
        .create_comment(NewComment {
            track_id: TrackId::new(req.song_id),
            user_id: auth.user_id().clone(),
            username: auth.0.display_name(),
            text: req.text,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/:id (admin only)
pub async fn delete_comment(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<MessageResponse>> {
    app_state.comments.delete_comment(&CommentId::new(id)).await?;
    Ok(MessageResponse::json("Comment deleted successfully"))
}
