//! Registered users

use crate::playlists;
use musify_core::{error::Result, now_timestamp, MusifyError, RegisterUser, User, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn user_from_row(row: &SqliteRow) -> std::result::Result<User, sqlx::Error> {
    Ok(User {
        id: UserId::new(row.try_get::<String, _>("id")?),
        email: row.try_get("email")?,
        image_url: row.try_get("image_url")?,
        is_admin: row.try_get::<i64, _>("is_admin")? != 0,
        created_at: row.try_get("created_at")?,
    })
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, image_url, is_admin, created_at FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(user_from_row).transpose()?)
}

/// Insert or update a user and make sure the default playlist exists
pub async fn register(pool: &SqlitePool, user: RegisterUser) -> Result<User> {
    if user.id.as_str().trim().is_empty() || user.email.trim().is_empty() {
        return Err(MusifyError::invalid_input("User id and email are required"));
    }

    sqlx::query(
        r#"
        INSERT INTO users (id, email, image_url, is_admin, created_at)
        VALUES (?, ?, ?, 0, ?)
        ON CONFLICT(id) DO UPDATE SET
            email = excluded.email,
            image_url = excluded.image_url
        "#,
    )
    .bind(user.id.as_str())
    .bind(user.email.trim())
    .bind(user.image_url.as_deref())
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    playlists::ensure_default(pool, &user.id).await?;

    get_by_id(pool, &user.id)
        .await?
        .ok_or_else(|| MusifyError::storage("Failed to retrieve registered user"))
}

/// Record the admin flag (set out of band, e.g. from the token's admin claim)
pub async fn set_admin(pool: &SqlitePool, id: &UserId, is_admin: bool) -> Result<()> {
    let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
        .bind(is_admin)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MusifyError::not_found("User", id.as_str()));
    }

    Ok(())
}
