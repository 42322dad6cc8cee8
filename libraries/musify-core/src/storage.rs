//! Collaborator contracts for catalog, playlists, comments and users
//!
//! The SQLite implementation lives in `musify-storage`; the server talks to
//! these traits only.

use crate::error::Result;
use crate::types::{
    Comment, CommentId, NewComment, NewTrack, Playlist, PlaylistId, RegisterUser, Track, TrackId,
    TrackScope, User, UserId, Visibility,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Read and write access to the track catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List tracks for a scope; an empty vector when nothing matches
    async fn list_tracks(&self, scope: &TrackScope) -> Result<Vec<Track>>;

    /// Get track by ID
    async fn get_track(&self, id: &TrackId) -> Result<Option<Track>>;

    /// Case-insensitive search over title, artist and genre of public tracks
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    /// Insert a validated track record
    async fn create_track(&self, track: NewTrack) -> Result<Track>;

    /// Delete the track record only; backing assets are the caller's concern
    async fn delete_track(&self, id: &TrackId) -> Result<()>;

    // ========================================================================
    // User uploads
    // ========================================================================

    /// Tracks uploaded by a user, any visibility
    async fn list_user_tracks(&self, owner: &UserId) -> Result<Vec<Track>>;

    /// Change visibility of a track the user owns
    async fn set_visibility(
        &self,
        owner: &UserId,
        id: &TrackId,
        visibility: Visibility,
    ) -> Result<Track>;
}

/// Per-user playlists
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create the default playlist if the user has none, and return it
    async fn ensure_default_playlist(&self, user: &UserId) -> Result<Playlist>;

    /// List a user's playlists, default playlist included
    async fn list_playlists(&self, user: &UserId) -> Result<Vec<Playlist>>;

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    async fn create_playlist(&self, user: &UserId, name: &str) -> Result<Playlist>;

    /// Delete a playlist; the default playlist is refused for every caller
    async fn delete_playlist(&self, user: &UserId, id: &PlaylistId) -> Result<()>;

    /// Append a track; fails with `Duplicate` if already present
    async fn add_track(&self, user: &UserId, playlist: &PlaylistId, track: &TrackId)
        -> Result<()>;

    /// Remove a track; fails with `NotFound` if absent
    async fn remove_track(
        &self,
        user: &UserId,
        playlist: &PlaylistId,
        track: &TrackId,
    ) -> Result<()>;

    /// Tracks of a playlist in insertion order, omitting private tracks
    /// the viewer does not own
    async fn playlist_tracks(
        &self,
        id: &PlaylistId,
        viewer: Option<&UserId>,
    ) -> Result<Vec<Track>>;
}

/// Track comments
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments grouped by track, newest first, capped per track
    async fn list_comments(&self) -> Result<HashMap<TrackId, Vec<Comment>>>;

    async fn create_comment(&self, comment: NewComment) -> Result<Comment>;

    async fn delete_comment(&self, id: &CommentId) -> Result<()>;
}

/// Registered users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert or update a user; also ensures the default playlist
    async fn register_user(&self, user: RegisterUser) -> Result<User>;

    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Record the admin flag carried by the caller's identity
    async fn set_admin(&self, id: &UserId, is_admin: bool) -> Result<()>;
}
