//! Core types for the playback controller

use musify_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Identifies one media session (one loaded track)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

/// Token of a single play request; only the latest one may settle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Nothing loaded
    #[default]
    Idle,
    /// Play requested, not yet confirmed by the backend
    Loading,
    /// Backend confirmed playback
    Playing,
    /// Paused, or a play request was rejected
    Paused,
}

/// How `next()` picks the following track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdvancePolicy {
    /// Wrap-around order (playlist views)
    #[default]
    Sequential,
    /// Uniform random pick excluding the current track (all songs, search)
    Shuffle,
}

/// Tracks being navigated, copied in when playback starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveList {
    tracks: Vec<Track>,
    policy: AdvancePolicy,
}

impl ActiveList {
    pub fn new(tracks: Vec<Track>, policy: AdvancePolicy) -> Self {
        Self { tracks, policy }
    }

    pub fn sequential(tracks: Vec<Track>) -> Self {
        Self::new(tracks, AdvancePolicy::Sequential)
    }

    pub fn shuffle(tracks: Vec<Track>) -> Self {
        Self::new(tracks, AdvancePolicy::Shuffle)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Index of the first track with this id
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| &track.id == id)
    }
}

/// Playback controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Seed for the shuffle RNG; entropy when `None` (default: None)
    pub shuffle_seed: Option<u64>,

    /// Maximum queued events kept for `drain_events` (default: 256)
    pub event_queue_limit: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            shuffle_seed: None,
            event_queue_limit: 256,
        }
    }
}

/// Read-only view of the controller for presentation code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub status: PlaybackStatus,
    pub position_secs: f64,
    /// Duration reported by the media, 0 while unknown
    pub duration_secs: f64,
    /// Media duration, falling back to the catalog duration before load
    pub display_duration_secs: f64,
    pub progress: f64,
}

impl PlaybackSnapshot {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn position_label(&self) -> String {
        format_time(self.position_secs)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.display_duration_secs)
    }
}

/// `position / duration` clamped to [0, 1]; 0 for unknown or zero duration
pub fn progress(position_secs: f64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 || !position_secs.is_finite() {
        return 0.0;
    }
    (position_secs / duration_secs).clamp(0.0, 1.0)
}

/// Render seconds as `m:ss`; negative or non-finite input renders `0:00`
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
