/// Local asset store - audio and cover files on disk
use async_trait::async_trait;
use musify_core::{AssetKind, AssetStore, MusifyError, StoredAsset};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const MAX_EXTENSION_LEN: usize = 8;

/// Writes assets under `<root>/audio` and `<root>/covers`
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalAssetStore {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            root,
            public_base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the per-kind directories
    pub async fn initialize(&self) -> std::io::Result<()> {
        for kind in [AssetKind::Audio, AssetKind::Cover] {
            fs::create_dir_all(self.root.join(kind.dir_name())).await?;
        }
        Ok(())
    }

    /// Public URL of a stored asset
    pub fn url_for(&self, kind: AssetKind, asset_id: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, kind.dir_name(), asset_id)
    }

    fn path_for(&self, kind: AssetKind, asset_id: &str) -> musify_core::Result<PathBuf> {
        if !is_valid_asset_id(asset_id) {
            return Err(MusifyError::invalid_input(format!(
                "Invalid asset id: {asset_id}"
            )));
        }
        Ok(self.root.join(kind.dir_name()).join(asset_id))
    }
}

/// Lowercased alphanumeric extension, or `None` when unusable
pub fn sanitize_extension(extension: &str) -> Option<String> {
    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    let valid = !extension.is_empty()
        && extension.len() <= MAX_EXTENSION_LEN
        && extension.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(extension)
}

/// Asset ids are single path components without separators
fn is_valid_asset_id(asset_id: &str) -> bool {
    !asset_id.is_empty()
        && !asset_id.starts_with('.')
        && asset_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(
        &self,
        kind: AssetKind,
        bytes: &[u8],
        extension: &str,
    ) -> musify_core::Result<StoredAsset> {
        let extension = sanitize_extension(extension).ok_or_else(|| {
            MusifyError::invalid_input(format!("Unsupported file extension: {extension}"))
        })?;
        if bytes.is_empty() {
            return Err(MusifyError::invalid_input("Upload body is empty"));
        }

        let asset_id = format!("{}.{}", uuid::Uuid::new_v4(), extension);
        let path = self.path_for(kind, &asset_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;

        tracing::info!(kind = kind.dir_name(), %asset_id, size = bytes.len(), "Stored asset");

        Ok(StoredAsset {
            url: self.url_for(kind, &asset_id),
            asset_id,
        })
    }

    async fn delete(&self, kind: AssetKind, asset_id: &str) -> musify_core::Result<()> {
        let path = self.path_for(kind, asset_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(kind = kind.dir_name(), %asset_id, "Asset already absent");
                Ok(())
            }
            Err(e) => Err(MusifyError::asset(format!(
                "Failed to delete {}/{asset_id}: {e}",
                kind.dir_name()
            ))),
        }
    }
}
