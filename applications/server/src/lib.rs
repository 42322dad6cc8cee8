//! Musify Server Library
//!
//! REST API for the Musify catalog, playlists, comments and uploads.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{AuthService, CatalogService, LocalAssetStore};
pub use state::AppState;
