//! Musify - Playback Control
//!
//! Client-side playback controller for Musify.
//!
//! This crate provides:
//! - A single controller owning the current track, status and position
//! - Transport operations: play, pause/resume, seek, next, previous
//! - Auto-advance on natural end, sequential or shuffled per view
//! - Request tokens so that only the latest play request settles state
//! - Subscribers and a drainable event queue for presentation surfaces
//!
//! # Architecture
//!
//! `musify-playback` does not decode or output audio. The platform supplies
//! a [`MediaBackend`] (an HTML audio element, a native player) and feeds its
//! notifications back as [`BackendEvent`]s. The controller is synchronous:
//! each call mutates state in order and never blocks.
//!
//! # Example
//!
//! ```rust
//! use musify_core::{Track, TrackId};
//! use musify_playback::{
//!     ActiveList, BackendEvent, MediaBackend, PlaybackConfig, PlaybackController,
//!     PlaybackStatus, RequestId, SessionId,
//! };
//!
//! #[derive(Default)]
//! struct Requests(Vec<(SessionId, RequestId)>);
//!
//! impl MediaBackend for Requests {
//!     fn open(&mut self, _session: SessionId, _url: &str) {}
//!     fn request_play(&mut self, session: SessionId, request: RequestId) {
//!         self.0.push((session, request));
//!     }
//!     fn pause(&mut self, _session: SessionId) {}
//!     fn seek(&mut self, _session: SessionId, _position_secs: f64) {}
//!     fn release(&mut self, _session: SessionId) {}
//! }
//!
//! let mut controller = PlaybackController::new(Requests::default(), PlaybackConfig::default());
//!
//! let track = Track::new(TrackId::new("t-1"), "Invincible", "DEAF KEV")
//!     .with_audio_url("https://cdn.example.com/audio/invincible.mp3");
//! controller.play(track.clone(), ActiveList::shuffle(vec![track]));
//! assert_eq!(controller.status(), PlaybackStatus::Loading);
//!
//! // The platform confirms playback started
//! let (session, request) = controller.backend().0[0];
//! controller.handle_backend_event(BackendEvent::PlaySettled {
//!     session,
//!     request,
//!     outcome: Ok(()),
//! });
//! assert_eq!(controller.status(), PlaybackStatus::Playing);
//! ```

mod backend;
mod controller;
mod error;
mod events;
pub mod navigation;
pub mod shuffle;
pub mod types;

// Public exports
pub use backend::{BackendEvent, MediaBackend};
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::{Listener, PlaybackEvent, SubscriptionId};
pub use shuffle::pick_random_excluding;
pub use types::{
    format_time, progress, ActiveList, AdvancePolicy, PlaybackConfig, PlaybackSnapshot,
    PlaybackStatus, RequestId, SessionId,
};
