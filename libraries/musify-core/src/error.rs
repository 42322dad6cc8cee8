/// Core error types for Musify
use thiserror::Error;

/// Result type alias using `MusifyError`
pub type Result<T> = std::result::Result<T, MusifyError>;

/// Core error type for Musify
#[derive(Error, Debug)]
pub enum MusifyError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Asset store errors (upload/delete of audio and cover files)
    #[error("Asset error: {0}")]
    Asset(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Permission denied
    #[error("Permission denied")]
    PermissionDenied,

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDeniedWithContext(String),

    /// The reserved default playlist cannot be removed
    #[error("Cannot delete the \"{0}\" playlist")]
    ProtectedPlaylist(String),

    /// Duplicate entry
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl MusifyError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an asset error
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDeniedWithContext(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a duplicate entry error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MusifyError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
