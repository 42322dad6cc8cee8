//! Error types for playback

use thiserror::Error;

/// Failures a media backend reports for a play request
///
/// These never escape the controller: they are mapped to `Paused` and
/// published as `PlaybackEvent::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// The media could not be fetched or decoded
    #[error("Media error: {0}")]
    Media(String),

    /// The track has no usable audio source
    #[error("Track is not playable: {0}")]
    Unplayable(String),

    /// The request was interrupted before it settled
    #[error("Play request aborted")]
    Aborted,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
