//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use musify_core::{
    AssetKind, AssetStore, Catalog, Identity, MusifyError, NewTrack, StoredAsset, Track, UserId,
    Visibility,
};
use musify_server::{api, services::AuthService, state::AppState, LocalAssetStore};
use musify_storage::Database;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Router wired to a temporary database and asset root
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub asset_root: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    /// App backed by a `LocalAssetStore` under the temp dir
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let asset_root = temp_dir.path().join("assets");
        let store = LocalAssetStore::new(asset_root.clone(), "/assets");
        store.initialize().await.unwrap();
        Self::with_assets(temp_dir, asset_root, Arc::new(store)).await
    }

    /// App whose asset store fails every call
    pub async fn with_failing_assets() -> (Self, Arc<FailingAssetStore>) {
        let temp_dir = TempDir::new().unwrap();
        let asset_root = temp_dir.path().join("assets");
        let store = Arc::new(FailingAssetStore::default());
        let app = Self::with_assets(temp_dir, asset_root, store.clone()).await;
        (app, store)
    }

    async fn with_assets(
        temp_dir: TempDir,
        asset_root: std::path::PathBuf,
        assets: Arc<dyn AssetStore>,
    ) -> Self {
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Arc::new(Database::connect(&db_url).await.unwrap());
        let auth = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1));

        let state = AppState::new(Arc::clone(&db), assets, Arc::clone(&auth));
        Self {
            router: api::router(state),
            db,
            auth,
            asset_root,
            _temp_dir: temp_dir,
        }
    }

    pub fn user_token(&self, user_id: &str) -> String {
        let identity = Identity::new(UserId::new(user_id)).with_email(format!("{user_id}@example.com"));
        self.auth.issue_token(&identity).unwrap()
    }

    pub fn admin_token(&self, user_id: &str) -> String {
        let identity = Identity::new(UserId::new(user_id))
            .with_email(format!("{user_id}@example.com"))
            .admin();
        self.auth.issue_token(&identity).unwrap()
    }

    /// Send a request and return the raw response
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Insert a catalog track directly
    pub async fn seed_track(&self, title: &str, genre: &str) -> Track {
        self.db.create_track(new_track(title, genre)).await.unwrap()
    }
}

/// Decode a JSON response body
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Fixture: a complete song payload
pub fn new_track(title: &str, genre: &str) -> NewTrack {
    let slug = title.to_lowercase().replace(' ', "-");
    NewTrack {
        title: title.to_string(),
        artist: "Test Artist".to_string(),
        album: None,
        genre: genre.to_string(),
        audio_url: format!("/assets/audio/{slug}.mp3"),
        audio_asset_id: format!("{slug}.mp3"),
        cover_url: format!("/assets/covers/{slug}.jpg"),
        cover_asset_id: format!("{slug}.jpg"),
        duration_seconds: Some(200),
        owner_id: None,
        visibility: Visibility::Public,
    }
}

/// Asset store that records delete attempts and always fails
#[derive(Default)]
pub struct FailingAssetStore {
    pub delete_attempts: Mutex<Vec<(AssetKind, String)>>,
}

#[async_trait]
impl AssetStore for FailingAssetStore {
    async fn store(
        &self,
        _kind: AssetKind,
        _bytes: &[u8],
        _extension: &str,
    ) -> musify_core::Result<StoredAsset> {
        Err(MusifyError::asset("upload backend unavailable"))
    }

    async fn delete(&self, kind: AssetKind, asset_id: &str) -> musify_core::Result<()> {
        self.delete_attempts
            .lock()
            .unwrap()
            .push((kind, asset_id.to_string()));
        Err(MusifyError::asset("delete backend unavailable"))
    }
}
