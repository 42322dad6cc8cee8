//! Asset store contract for uploaded audio files and cover images

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Category of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Audio,
    Cover,
}

impl AssetKind {
    /// Directory (and URL segment) the kind is stored under
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Cover => "covers",
        }
    }

    /// Parse a route segment such as `audio` or `cover`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(Self::Audio),
            "cover" | "covers" => Some(Self::Cover),
            _ => None,
        }
    }
}

/// Handle of a stored file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    /// Opaque id used to delete the file later
    pub asset_id: String,
    /// Public URL the client loads
    pub url: String,
}

/// Upload and delete backing files of catalog tracks
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store bytes under a new asset id
    async fn store(&self, kind: AssetKind, bytes: &[u8], extension: &str) -> Result<StoredAsset>;

    /// Delete an asset. Deleting an asset that does not exist succeeds.
    async fn delete(&self, kind: AssetKind, asset_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing() {
        assert_eq!(AssetKind::parse("audio"), Some(AssetKind::Audio));
        assert_eq!(AssetKind::parse("cover"), Some(AssetKind::Cover));
        assert_eq!(AssetKind::parse("video"), None);
        assert_eq!(AssetKind::Cover.dir_name(), "covers");
    }
}
