/// Playlist domain type
use super::ids::{PlaylistId, UserId};
use serde::{Deserialize, Serialize};

/// Name of the per-user default playlist; it cannot be deleted
pub const DEFAULT_PLAYLIST_NAME: &str = "Fav songs";

/// User-owned ordered list of tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub owner_id: UserId,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Playlist {
    /// Check if a user owns this playlist
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Whether deletion must be refused regardless of the caller
    pub fn is_protected(&self) -> bool {
        self.is_default || self.name == DEFAULT_PLAYLIST_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(name: &str, is_default: bool) -> Playlist {
        Playlist {
            id: PlaylistId::new("p-1"),
            owner_id: UserId::new("u-1"),
            name: name.to_string(),
            created_at: "2025-03-01T00:00:00.000000Z".to_string(),
            is_default,
        }
    }

    #[test]
    fn default_playlist_is_protected() {
        assert!(playlist(DEFAULT_PLAYLIST_NAME, true).is_protected());
        assert!(playlist(DEFAULT_PLAYLIST_NAME, false).is_protected());
        assert!(!playlist("Road trip", false).is_protected());
    }

    #[test]
    fn ownership_check() {
        let p = playlist("Road trip", false);
        assert!(p.is_owned_by(&UserId::new("u-1")));
        assert!(!p.is_owned_by(&UserId::new("u-2")));
    }
}
