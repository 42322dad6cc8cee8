//! Per-user playlists and their tracks

use crate::tracks;
use musify_core::{
    error::Result, now_timestamp, MusifyError, Playlist, PlaylistId, Track, TrackId, UserId,
    DEFAULT_PLAYLIST_NAME,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn playlist_from_row(row: &SqliteRow) -> std::result::Result<Playlist, sqlx::Error> {
    Ok(Playlist {
        id: PlaylistId::new(row.try_get::<String, _>("id")?),
        owner_id: UserId::new(row.try_get::<String, _>("owner_id")?),
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        is_default: row.try_get::<i64, _>("is_default")? != 0,
    })
}

/// Create the user's default playlist if missing and return it
pub async fn ensure_default(pool: &SqlitePool, user_id: &UserId) -> Result<Playlist> {
    // The partial unique index turns a second default into a no-op
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO playlists (id, owner_id, name, is_default, created_at)
        VALUES (?, ?, ?, 1, ?)
        "#,
    )
    .bind(PlaylistId::generate().as_str())
    .bind(user_id.as_str())
    .bind(DEFAULT_PLAYLIST_NAME)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    let row = sqlx::query(
        r#"
        SELECT id, owner_id, name, is_default, created_at
        FROM playlists
        WHERE owner_id = ? AND is_default = 1
        "#,
    )
    .bind(user_id.as_str())
    .fetch_one(pool)
    .await?;

    Ok(playlist_from_row(&row)?)
}

/// Get user's playlists, default playlist first
pub async fn get_user_playlists(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<Playlist>> {
    ensure_default(pool, user_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, name, is_default, created_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY is_default DESC, created_at ASC, rowid ASC
        "#,
    )
    .bind(user_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(playlist_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, is_default, created_at FROM playlists WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(playlist_from_row).transpose()?)
}

/// Create new playlist
pub async fn create(pool: &SqlitePool, owner_id: &UserId, name: &str) -> Result<Playlist> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MusifyError::invalid_input("Playlist name is required"));
    }
    if name == DEFAULT_PLAYLIST_NAME {
        return Err(MusifyError::duplicate(format!(
            "\"{DEFAULT_PLAYLIST_NAME}\" already exists"
        )));
    }

    let id = PlaylistId::generate();
    sqlx::query(
        r#"
        INSERT INTO playlists (id, owner_id, name, is_default, created_at)
        VALUES (?, ?, ?, 0, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(owner_id.as_str())
    .bind(name)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MusifyError::storage("Failed to retrieve created playlist"))
}

/// Load a playlist the user may modify
async fn get_owned(pool: &SqlitePool, user_id: &UserId, id: &PlaylistId) -> Result<Playlist> {
    let playlist = get_by_id(pool, id)
        .await?
        .ok_or_else(|| MusifyError::not_found("Playlist", id.as_str()))?;

    if !playlist.is_owned_by(user_id) {
        return Err(MusifyError::PermissionDenied);
    }

    Ok(playlist)
}

/// Delete playlist
///
/// The default playlist is refused for every caller, owner included.
pub async fn delete(pool: &SqlitePool, user_id: &UserId, id: &PlaylistId) -> Result<()> {
    let playlist = get_by_id(pool, id)
        .await?
        .ok_or_else(|| MusifyError::not_found("Playlist", id.as_str()))?;

    if playlist.is_protected() {
        return Err(MusifyError::ProtectedPlaylist(playlist.name));
    }
    if !playlist.is_owned_by(user_id) {
        return Err(MusifyError::PermissionDenied);
    }

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(())
}

/// Add track to playlist
pub async fn add_track(
    pool: &SqlitePool,
    user_id: &UserId,
    playlist_id: &PlaylistId,
    track_id: &TrackId,
) -> Result<()> {
    get_owned(pool, user_id, playlist_id).await?;

    // Someone else's private upload is indistinguishable from a missing one
    let visible = tracks::get_by_id(pool, track_id)
        .await?
        .is_some_and(|track| track.is_visible_to(Some(user_id)));
    if !visible {
        return Err(MusifyError::not_found("Track", track_id.as_str()));
    }

    let existing = sqlx::query(
        "SELECT 1 FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?",
    )
    .bind(playlist_id.as_str())
    .bind(track_id.as_str())
    .fetch_optional(pool)
    .await?;

    if existing.is_some() {
        return Err(MusifyError::duplicate("Song already in playlist"));
    }

    sqlx::query(
        r#"
        INSERT INTO playlist_tracks (playlist_id, track_id, position, added_at)
        VALUES (
            ?1, ?2,
            (SELECT COALESCE(MAX(position), 0) + 1 FROM playlist_tracks WHERE playlist_id = ?1),
            ?3
        )
        "#,
    )
    .bind(playlist_id.as_str())
    .bind(track_id.as_str())
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove track from playlist
pub async fn remove_track(
    pool: &SqlitePool,
    user_id: &UserId,
    playlist_id: &PlaylistId,
    track_id: &TrackId,
) -> Result<()> {
    get_owned(pool, user_id, playlist_id).await?;

    let result = sqlx::query("DELETE FROM playlist_tracks WHERE playlist_id = ? AND track_id = ?")
        .bind(playlist_id.as_str())
        .bind(track_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusifyError::not_found("Song in playlist", track_id.as_str()));
    }

    Ok(())
}

/// Tracks of a playlist in insertion order, as seen by `viewer`
pub async fn get_tracks(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    viewer: Option<&UserId>,
) -> Result<Vec<Track>> {
    tracks::get_by_playlist(pool, playlist_id, viewer).await
}
