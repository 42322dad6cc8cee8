/// Shared application state
use crate::services::{AuthService, CatalogService};
use musify_core::{AssetStore, Catalog, CommentStore, PlaylistStore, UserStore};
use musify_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub playlists: Arc<dyn PlaylistStore>,
    pub comments: Arc<dyn CommentStore>,
    pub users: Arc<dyn UserStore>,
    pub catalog_service: Arc<CatalogService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        assets: Arc<dyn AssetStore>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        let catalog: Arc<dyn Catalog> = db.clone();
        let catalog_service = Arc::new(CatalogService::new(Arc::clone(&catalog), assets));

        Self {
            catalog,
            playlists: db.clone(),
            comments: db.clone(),
            users: db,
            catalog_service,
            auth_service,
        }
    }
}
