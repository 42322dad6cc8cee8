//! Catalog tracks

use crate::like_pattern;
use musify_core::{
    error::Result, now_timestamp, MusifyError, NewTrack, PlaylistId, Track, TrackId, TrackScope,
    UserId, Visibility,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const TRACK_COLUMNS: &str = "t.id, t.title, t.artist, t.album, t.genre, t.cover_url, t.audio_url, \
     t.duration_seconds, t.audio_asset_id, t.cover_asset_id, t.owner_id, t.visibility, t.created_at";

pub(crate) fn track_from_row(row: &SqliteRow) -> std::result::Result<Track, sqlx::Error> {
    let visibility: String = row.try_get("visibility")?;
    let duration: i64 = row.try_get("duration_seconds")?;

    Ok(Track {
        id: TrackId::new(row.try_get::<String, _>("id")?),
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        genre: row.try_get("genre")?,
        cover_url: row.try_get("cover_url")?,
        audio_url: row.try_get("audio_url")?,
        duration_seconds: u32::try_from(duration).unwrap_or_default(),
        audio_asset_id: row.try_get("audio_asset_id")?,
        cover_asset_id: row.try_get("cover_asset_id")?,
        owner_id: row.try_get::<Option<String>, _>("owner_id")?.map(UserId::new),
        visibility: Visibility::parse(&visibility).unwrap_or_default(),
        created_at: row.try_get("created_at")?,
    })
}

fn tracks_from_rows(rows: &[SqliteRow]) -> Result<Vec<Track>> {
    Ok(rows
        .iter()
        .map(track_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// List tracks for a scope
pub async fn list(pool: &SqlitePool, scope: &TrackScope) -> Result<Vec<Track>> {
    match scope {
        TrackScope::All => get_all_public(pool).await,
        TrackScope::Genre(genre) => get_by_genre(pool, genre).await,
        TrackScope::Id(id) => Ok(get_by_id(pool, id)
            .await?
            .filter(|track| track.is_visible_to(None))
            .into_iter()
            .collect()),
        TrackScope::Playlist(id) => get_by_playlist(pool, id, None).await,
    }
}

/// All public tracks, newest first
pub async fn get_all_public(pool: &SqlitePool) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t \
         WHERE t.visibility = 'public' \
         ORDER BY t.created_at DESC, t.rowid DESC"
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    tracks_from_rows(&rows)
}

/// Public tracks with an exact genre
pub async fn get_by_genre(pool: &SqlitePool, genre: &str) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t \
         WHERE t.visibility = 'public' AND t.genre = ? \
         ORDER BY t.created_at DESC, t.rowid DESC"
    );
    let rows = sqlx::query(&sql).bind(genre).fetch_all(pool).await?;
    tracks_from_rows(&rows)
}

/// Get track by ID
pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let sql = format!("SELECT {TRACK_COLUMNS} FROM tracks t WHERE t.id = ?");
    let row = sqlx::query(&sql)
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(track_from_row).transpose()?)
}

/// Tracks of a playlist in insertion order
///
/// Private tracks are only returned to their owner.
pub async fn get_by_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    viewer: Option<&UserId>,
) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM playlist_tracks pt \
         INNER JOIN tracks t ON pt.track_id = t.id \
         WHERE pt.playlist_id = ?1 \
           AND (t.visibility = 'public' OR t.owner_id = ?2) \
         ORDER BY pt.position"
    );
    let rows = sqlx::query(&sql)
        .bind(playlist_id.as_str())
        .bind(viewer.map(UserId::as_str))
        .fetch_all(pool)
        .await?;
    tracks_from_rows(&rows)
}

/// Search public tracks by title, artist or genre
///
/// Matching ignores ASCII case only, like SQLite's `LOWER()`; non-ASCII
/// letters must match exactly.
pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Track>> {
    let query = query.trim().to_ascii_lowercase();
    if query.is_empty() {
        return get_all_public(pool).await;
    }

    let pattern = like_pattern(&query);
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t \
         WHERE t.visibility = 'public' AND ( \
             LOWER(t.title) LIKE ?1 ESCAPE '\\' \
             OR LOWER(t.artist) LIKE ?1 ESCAPE '\\' \
             OR LOWER(t.genre) LIKE ?1 ESCAPE '\\') \
         ORDER BY t.title COLLATE NOCASE"
    );
    let rows = sqlx::query(&sql).bind(pattern).fetch_all(pool).await?;
    tracks_from_rows(&rows)
}

/// Tracks uploaded by a user, any visibility
pub async fn get_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<Track>> {
    let sql = format!(
        "SELECT {TRACK_COLUMNS} FROM tracks t \
         WHERE t.owner_id = ? \
         ORDER BY t.created_at DESC, t.rowid DESC"
    );
    let rows = sqlx::query(&sql)
        .bind(owner.as_str())
        .fetch_all(pool)
        .await?;
    tracks_from_rows(&rows)
}

/// Create a new track
pub async fn create(pool: &SqlitePool, track: NewTrack) -> Result<Track> {
    track.validate()?;

    let id = TrackId::generate();
    let duration = i64::from(track.effective_duration());

    sqlx::query(
        r#"
        INSERT INTO tracks (
            id, title, artist, album, genre, cover_url, audio_url, duration_seconds,
            audio_asset_id, cover_asset_id, owner_id, visibility, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(track.title.trim())
    .bind(track.artist.trim())
    .bind(track.album.as_deref())
    .bind(track.genre.trim())
    .bind(&track.cover_url)
    .bind(&track.audio_url)
    .bind(duration)
    .bind(&track.audio_asset_id)
    .bind(&track.cover_asset_id)
    .bind(track.owner_id.as_ref().map(UserId::as_str))
    .bind(track.visibility.as_str())
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| MusifyError::storage("Failed to retrieve created track"))
}

/// Delete a track record
pub async fn delete(pool: &SqlitePool, id: &TrackId) -> Result<()> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusifyError::not_found("Track", id.as_str()));
    }

    Ok(())
}

/// Change visibility of a track owned by `owner`
pub async fn set_visibility(
    pool: &SqlitePool,
    owner: &UserId,
    id: &TrackId,
    visibility: Visibility,
) -> Result<Track> {
    let track = get_by_id(pool, id)
        .await?
        .ok_or_else(|| MusifyError::not_found("Track", id.as_str()))?;

    if track.owner_id.as_ref() != Some(owner) {
        return Err(MusifyError::permission_denied(
            "Only the uploader can change this track",
        ));
    }

    sqlx::query("UPDATE tracks SET visibility = ? WHERE id = ?")
        .bind(visibility.as_str())
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(Track { visibility, ..track })
}
