/// Catalog service - track writes that span the database and the asset store
use crate::error::{Result, ServerError};
use musify_core::{
    AssetKind, AssetStore, Catalog, Identity, NewTrack, StoredAsset, Track, TrackId, Visibility,
};
use std::sync::Arc;

pub struct CatalogService {
    catalog: Arc<dyn Catalog>,
    assets: Arc<dyn AssetStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn Catalog>, assets: Arc<dyn AssetStore>) -> Self {
        Self { catalog, assets }
    }

    /// Store an uploaded file and return its handle
    pub async fn upload(&self, kind: AssetKind, bytes: &[u8], extension: &str) -> Result<StoredAsset> {
        Ok(self.assets.store(kind, bytes, extension).await?)
    }

    /// Create a catalog track owned by nobody
    pub async fn create_track(&self, new_track: NewTrack) -> Result<Track> {
        let track = self
            .catalog
            .create_track(NewTrack {
                owner_id: None,
                ..new_track
            })
            .await?;
        tracing::info!(track_id = %track.id, title = %track.title, "Created track");
        Ok(track)
    }

    /// Create a track owned by the caller
    pub async fn create_user_track(&self, identity: &Identity, new_track: NewTrack) -> Result<Track> {
        let track = self
            .catalog
            .create_track(NewTrack {
                owner_id: Some(identity.user_id.clone()),
                ..new_track
            })
            .await?;
        tracing::info!(track_id = %track.id, owner = %identity.user_id, "Created user track");
        Ok(track)
    }

    /// Delete a track and both of its backing assets
    ///
    /// Asset failures are logged and do not stop the record deletion.
    pub async fn delete_track(&self, id: &TrackId) -> Result<Track> {
        let track = self
            .catalog
            .get_track(id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("Song not found: {id}")))?;

        self.delete_assets(&track).await;
        self.catalog.delete_track(id).await?;

        tracing::info!(track_id = %id, "Deleted track");
        Ok(track)
    }

    /// Delete a track the caller uploaded
    pub async fn delete_user_track(&self, identity: &Identity, id: &TrackId) -> Result<Track> {
        self.owned_track(identity, id).await?;
        self.delete_track(id).await
    }

    /// Change the visibility of a track the caller uploaded
    pub async fn set_visibility(
        &self,
        identity: &Identity,
        id: &TrackId,
        visibility: Visibility,
    ) -> Result<Track> {
        self.owned_track(identity, id).await?;
        Ok(self
            .catalog
            .set_visibility(&identity.user_id, id, visibility)
            .await?)
    }

    async fn owned_track(&self, identity: &Identity, id: &TrackId) -> Result<Track> {
        self.catalog
            .get_track(id)
            .await?
            .filter(|track| track.owner_id.as_ref() == Some(&identity.user_id))
            .ok_or_else(|| ServerError::NotFound("Song not found or not owned by user".to_string()))
    }

    async fn delete_assets(&self, track: &Track) {
        let assets = [
            (AssetKind::Audio, track.audio_asset_id.as_deref()),
            (AssetKind::Cover, track.cover_asset_id.as_deref()),
        ];

        for (kind, asset_id) in assets {
            let Some(asset_id) = asset_id.filter(|id| !id.is_empty()) else {
                continue;
            };
            if let Err(e) = self.assets.delete(kind, asset_id).await {
                tracing::warn!(
                    track_id = %track.id,
                    kind = kind.dir_name(),
                    asset_id,
                    "Failed to delete asset: {}",
                    e
                );
            }
        }
    }
}
