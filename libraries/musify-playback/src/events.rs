//! Playback events and subscriber registry
//!
//! Every state change of the controller is published to subscribers and
//! queued for `drain_events`. Presentation surfaces (player bar, song rows)
//! rebuild from these instead of holding their own copy of the state.

use crate::types::PlaybackStatus;
use musify_core::TrackId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Status changed
    StateChanged { status: PlaybackStatus },

    /// A new track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// Playhead moved (backend update or optimistic seek)
    PositionChanged { position_secs: f64, progress: f64 },

    /// Media reported its duration
    DurationChanged { duration_secs: f64 },

    /// Track reached its natural end
    TrackFinished { track_id: TrackId },

    /// A play request failed; the track stays current and can be retried
    Error {
        track_id: Option<TrackId>,
        message: String,
    },
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked for each published event
pub type Listener = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Listeners plus a bounded queue of undrained events
pub(crate) struct EventHub {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    queue: VecDeque<PlaybackEvent>,
    queue_limit: usize,
}

impl EventHub {
    pub(crate) fn new(queue_limit: usize) -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
            queue: VecDeque::new(),
            queue_limit,
        }
    }

    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if the id was not subscribed
    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn publish(&mut self, event: PlaybackEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }

        if self.queue_limit == 0 {
            return;
        }
        // Oldest events are dropped first
        while self.queue.len() >= self.queue_limit {
            self.queue.pop_front();
        }
        self.queue.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PlaybackEvent> {
        self.queue.drain(..).collect()
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listeners.len())
            .field("queued", &self.queue.len())
            .field("queue_limit", &self.queue_limit)
            .finish()
    }
}
