/// Track domain type
use super::ids::{PlaylistId, TrackId, UserId};
use crate::error::{MusifyError, Result};
use serde::{Deserialize, Serialize};

/// Duration recorded for uploads that do not report one (seconds)
pub const DEFAULT_TRACK_DURATION_SECS: u32 = 180;

/// Who can see a track in the public catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playable audio item with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Genre label
    #[serde(default)]
    pub genre: String,

    /// Cover image URL (UI falls back to a placeholder when absent)
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Audio URL; tracks without one cannot be played
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Duration in seconds as recorded at upload time.
    ///
    /// Only a display fallback: the decoded media reports the real value.
    #[serde(default)]
    pub duration_seconds: u32,

    /// Asset store handle of the audio file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_asset_id: Option<String>,

    /// Asset store handle of the cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_asset_id: Option<String>,

    /// Uploading user, for user-owned tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub created_at: String,
}

impl Track {
    /// Create a track with only identity and display fields set
    pub fn new(id: TrackId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: String::new(),
            cover_url: None,
            audio_url: None,
            duration_seconds: 0,
            audio_asset_id: None,
            cover_asset_id: None,
            owner_id: None,
            visibility: Visibility::Public,
            created_at: String::new(),
        }
    }

    /// Set the audio URL
    #[must_use]
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Set the recorded duration
    #[must_use]
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the genre
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// The audio URL, if it is present and non-blank
    pub fn playable_url(&self) -> Option<&str> {
        self.audio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether the track can be handed to a media backend
    pub fn is_playable(&self) -> bool {
        self.playable_url().is_some()
    }

    /// Public tracks are visible to everyone, private ones only to their owner
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::Private => viewer.is_some() && self.owner_id.as_ref() == viewer,
        }
    }

    /// Case-insensitive match on title, artist or genre
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.artist.to_lowercase().contains(&query)
            || self.genre.to_lowercase().contains(&query)
    }
}

/// Data for creating a new catalog track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    pub genre: String,
    pub audio_url: String,
    pub audio_asset_id: String,
    pub cover_url: String,
    pub cover_asset_id: String,
    /// Falls back to `DEFAULT_TRACK_DURATION_SECS`
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl NewTrack {
    /// Check that every required field is present
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("artist", &self.artist),
            ("genre", &self.genre),
            ("audio_url", &self.audio_url),
            ("audio_asset_id", &self.audio_asset_id),
            ("cover_url", &self.cover_url),
            ("cover_asset_id", &self.cover_asset_id),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MusifyError::invalid_input(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Duration to record, applying the upload default
    pub fn effective_duration(&self) -> u32 {
        self.duration_seconds
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TRACK_DURATION_SECS)
    }
}

/// Which part of the catalog to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackScope {
    /// Every public track
    All,
    /// Public tracks with an exact genre label
    Genre(String),
    /// A single track by id
    Id(TrackId),
    /// Tracks of a playlist, in playlist order
    Playlist(PlaylistId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_new_track() -> NewTrack {
        NewTrack {
            title: "Blank".to_string(),
            artist: "Disfigure".to_string(),
            album: Some("Chill Vibes".to_string()),
            genre: "Melodic Dubstep".to_string(),
            audio_url: "https://cdn/audio/blank.mp3".to_string(),
            audio_asset_id: "audio/blank".to_string(),
            cover_url: "https://cdn/covers/blank.jpg".to_string(),
            cover_asset_id: "covers/blank".to_string(),
            duration_seconds: None,
            owner_id: None,
            visibility: Visibility::Public,
        }
    }

    #[test]
    fn blank_audio_url_is_not_playable() {
        let track = Track::new(TrackId::new("1"), "Song", "Artist").with_audio_url("   ");
        assert!(!track.is_playable());
        assert_eq!(track.playable_url(), None);

        let track = Track::new(TrackId::new("2"), "Song", "Artist");
        assert!(!track.is_playable());
    }

    #[test]
    fn playable_url_is_trimmed() {
        let track = Track::new(TrackId::new("1"), "Song", "Artist").with_audio_url(" a.mp3 ");
        assert_eq!(track.playable_url(), Some("a.mp3"));
    }

    #[test]
    fn query_matches_title_artist_and_genre() {
        let track = Track::new(TrackId::new("1"), "Nekozilla", "Different Heaven")
            .with_genre("Electronic");

        assert!(track.matches_query("neko"));
        assert!(track.matches_query("HEAVEN"));
        assert!(track.matches_query("electro"));
        assert!(track.matches_query(""));
        assert!(!track.matches_query("dubstep"));
    }

    #[test]
    fn private_tracks_are_visible_only_to_owner() {
        let owner = UserId::new("owner");
        let mut track = Track::new(TrackId::new("1"), "Demo", "Bedroom Producer");
        track.owner_id = Some(owner.clone());
        assert!(track.is_visible_to(None));

        track.visibility = Visibility::Private;
        assert!(track.is_visible_to(Some(&owner)));
        assert!(!track.is_visible_to(Some(&UserId::new("stranger"))));
        assert!(!track.is_visible_to(None));

        track.owner_id = None;
        assert!(!track.is_visible_to(Some(&owner)));
    }

    #[test]
    fn validate_reports_missing_fields() {
        let mut new_track = complete_new_track();
        assert!(new_track.validate().is_ok());

        new_track.audio_url = String::new();
        new_track.cover_asset_id = " ".to_string();
        let err = new_track.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Missing required fields: audio_url, cover_asset_id"
        );
    }

    #[test]
    fn duration_defaults_when_missing_or_zero() {
        let mut new_track = complete_new_track();
        assert_eq!(new_track.effective_duration(), DEFAULT_TRACK_DURATION_SECS);

        new_track.duration_seconds = Some(0);
        assert_eq!(new_track.effective_duration(), DEFAULT_TRACK_DURATION_SECS);

        new_track.duration_seconds = Some(242);
        assert_eq!(new_track.effective_duration(), 242);
    }

    #[test]
    fn visibility_string_conversion() {
        assert_eq!(Visibility::Private.as_str(), "private");
        assert_eq!(Visibility::parse("public"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("hidden"), None);
    }
}
