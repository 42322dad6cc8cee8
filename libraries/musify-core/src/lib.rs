//! Musify Core
//!
//! Platform-agnostic domain types, traits, and error handling for Musify.
//!
//! This crate provides the foundational building blocks shared by the
//! playback controller, the storage layer and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `Comment`, `User`, `Identity`
//! - **Collaborator Contracts**: `Catalog`, `PlaylistStore`, `CommentStore`,
//!   `UserStore` and `AssetStore`
//! - **Error Handling**: Unified `MusifyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use musify_core::types::{Track, TrackId};
//!
//! let track = Track::new(TrackId::new("t-1"), "Invincible", "DEAF KEV")
//!     .with_audio_url("https://cdn.example.com/audio/invincible.mp3");
//!
//! assert!(track.is_playable());
//! ```

#![forbid(unsafe_code)]

pub mod assets;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use assets::{AssetKind, AssetStore, StoredAsset};
pub use error::{MusifyError, Result};
pub use storage::{Catalog, CommentStore, PlaylistStore, UserStore};

pub use types::{
    group_recent_comments, now_timestamp, Comment, CommentId, Identity, NewComment, NewTrack,
    Playlist, PlaylistId, RegisterUser, Track, TrackId, TrackScope, User, UserId, Visibility,
    DEFAULT_PLAYLIST_NAME, DEFAULT_TRACK_DURATION_SECS, MAX_COMMENTS_PER_TRACK,
};
