//! Track comments

use crate::{tracks, users};
use musify_core::{
    error::Result, group_recent_comments, now_timestamp, Comment, CommentId, MusifyError,
    NewComment, TrackId, UserId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

fn comment_from_row(row: &SqliteRow) -> std::result::Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: CommentId::new(row.try_get::<String, _>("id")?),
        track_id: TrackId::new(row.try_get::<String, _>("track_id")?),
        user_id: UserId::new(row.try_get::<String, _>("user_id")?),
        username: row.try_get("username")?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Comments grouped by track, newest first, at most `per_track` each
pub async fn get_recent_by_track(
    pool: &SqlitePool,
    per_track: usize,
) -> Result<HashMap<TrackId, Vec<Comment>>> {
    let rows = sqlx::query(
        r#"
        SELECT id, track_id, user_id, username, text, created_at
        FROM comments
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let comments = rows
        .iter()
        .map(comment_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(group_recent_comments(comments, per_track))
}

/// Get comment by ID
pub async fn get_by_id(pool: &SqlitePool, id: &CommentId) -> Result<Option<Comment>> {
    let row = sqlx::query(
        "SELECT id, track_id, user_id, username, text, created_at FROM comments WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(comment_from_row).transpose()?)
}

/// Post a comment on an existing track by a registered user
pub async fn create(pool: &SqlitePool, comment: NewComment) -> Result<Comment> {
    comment.validate()?;

    if tracks::get_by_id(pool, &comment.track_id).await?.is_none() {
        return Err(MusifyError::not_found("Track", comment.track_id.as_str()));
    }
    if users::get_by_id(pool, &comment.user_id).await?.is_none() {
        return Err(MusifyError::not_found("User", comment.user_id.as_str()));
    }

    let id = CommentId::generate();
    sqlx::query(
        r#"
        INSERT INTO comments (id, track_id, user_id, username, text, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(comment.track_id.as_str())
    .bind(comment.user_id.as_str())
    .bind(comment.username.trim())
    .bind(comment.text.trim())
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MusifyError::storage("Failed to retrieve created comment"))
}

/// Delete a comment
pub async fn delete(pool: &SqlitePool, id: &CommentId) -> Result<()> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusifyError::not_found("Comment", id.as_str()));
    }

    Ok(())
}
