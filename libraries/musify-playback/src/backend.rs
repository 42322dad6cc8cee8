//! Media backend abstraction
//!
//! The platform layer (an HTML audio element, a native decoder, a test
//! double) implements `MediaBackend`. The controller is the only caller of
//! these primitives.
//!
//! Backends must not call back into the controller. Outcomes of play
//! requests and media progress are reported later as `BackendEvent`s passed
//! to `PlaybackController::handle_backend_event`.

use crate::error::PlaybackError;
use crate::types::{RequestId, SessionId};

/// Transport primitives of one underlying media element
pub trait MediaBackend {
    /// Load `url` into a new session
    fn open(&mut self, session: SessionId, url: &str);

    /// Ask the session to start or resume playing.
    ///
    /// The outcome arrives as `BackendEvent::PlaySettled` carrying `request`.
    fn request_play(&mut self, session: SessionId, request: RequestId);

    fn pause(&mut self, session: SessionId);

    /// Move the playhead to an absolute position
    fn seek(&mut self, session: SessionId, position_secs: f64);

    /// Free the session; no further events are expected for it
    fn release(&mut self, session: SessionId);
}

/// Notifications from the backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// A play request confirmed or failed
    PlaySettled {
        session: SessionId,
        request: RequestId,
        outcome: Result<(), PlaybackError>,
    },

    /// Media metadata loaded; non-finite values mean unknown
    DurationChanged { session: SessionId, secs: f64 },

    /// Periodic playhead update
    TimeUpdate { session: SessionId, secs: f64 },

    /// Playback reached the end of the media
    Ended { session: SessionId },
}

impl BackendEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::PlaySettled { session, .. }
            | Self::DurationChanged { session, .. }
            | Self::TimeUpdate { session, .. }
            | Self::Ended { session } => *session,
        }
    }
}
