use crate::{comments, create_pool, playlists, run_migrations, tracks, users, StorageError};
use async_trait::async_trait;
use musify_core::{
    error::Result, Catalog, Comment, CommentId, CommentStore, NewComment, NewTrack, Playlist,
    PlaylistId, PlaylistStore, RegisterUser, Track, TrackId, TrackScope, User, UserId, UserStore,
    Visibility, MAX_COMMENTS_PER_TRACK,
};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// `SQLite`-backed implementation of the Musify stores
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) and migrate the database at `database_url`
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for Database {
    async fn list_tracks(&self, scope: &TrackScope) -> Result<Vec<Track>> {
        tracks::list(&self.pool, scope).await
    }

    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        tracks::search(&self.pool, query).await
    }

    async fn create_track(&self, track: NewTrack) -> Result<Track> {
        tracks::create(&self.pool, track).await
    }

    async fn delete_track(&self, id: &TrackId) -> Result<()> {
        tracks::delete(&self.pool, id).await
    }

    async fn list_user_tracks(&self, owner: &UserId) -> Result<Vec<Track>> {
        tracks::get_by_owner(&self.pool, owner).await
    }

    async fn set_visibility(
        &self,
        owner: &UserId,
        id: &TrackId,
        visibility: Visibility,
    ) -> Result<Track> {
        tracks::set_visibility(&self.pool, owner, id, visibility).await
    }
}

#[async_trait]
impl PlaylistStore for Database {
    async fn ensure_default_playlist(&self, user: &UserId) -> Result<Playlist> {
        playlists::ensure_default(&self.pool, user).await
    }

    async fn list_playlists(&self, user: &UserId) -> Result<Vec<Playlist>> {
        playlists::get_user_playlists(&self.pool, user).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn create_playlist(&self, user: &UserId, name: &str) -> Result<Playlist> {
        playlists::create(&self.pool, user, name).await
    }

    async fn delete_playlist(&self, user: &UserId, id: &PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, user, id).await
    }

    async fn add_track(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        track: &TrackId,
    ) -> Result<()> {
        playlists::add_track(&self.pool, user, playlist, track).await
    }

    async fn remove_track(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        track: &TrackId,
    ) -> Result<()> {
        playlists::remove_track(&self.pool, user, playlist, track).await
    }

    async fn playlist_tracks(
        &self,
        id: &PlaylistId,
        viewer: Option<&UserId>,
    ) -> Result<Vec<Track>> {
        playlists::get_tracks(&self.pool, id, viewer).await
    }
}

#[async_trait]
impl CommentStore for Database {
    async fn list_comments(&self) -> Result<HashMap<TrackId, Vec<Comment>>> {
        comments::get_recent_by_track(&self.pool, MAX_COMMENTS_PER_TRACK).await
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment> {
        comments::create(&self.pool, comment).await
    }

    async fn delete_comment(&self, id: &CommentId) -> Result<()> {
        comments::delete(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for Database {
    async fn register_user(&self, user: RegisterUser) -> Result<User> {
        users::register(&self.pool, user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn set_admin(&self, id: &UserId, is_admin: bool) -> Result<()> {
        users::set_admin(&self.pool, id, is_admin).await
    }
}
