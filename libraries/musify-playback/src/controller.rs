//! Playback controller - the single authority over the media session
//!
//! Owns what is playing, from which list, and at what position. All
//! transport calls on the backend go through here.

use crate::{
    backend::{BackendEvent, MediaBackend},
    error::PlaybackError,
    events::{EventHub, Listener, PlaybackEvent, SubscriptionId},
    navigation::{advance_index, sequential_previous},
    types::{
        progress, ActiveList, PlaybackConfig, PlaybackSnapshot, PlaybackStatus, RequestId,
        SessionId,
    },
};
use musify_core::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Session currently bound to `current_track`
#[derive(Debug, Clone, Copy)]
struct LiveSession {
    id: SessionId,
    /// Play request awaiting settlement
    pending_request: Option<RequestId>,
    /// Set once `Ended` has been handled, cleared by the next play request
    finished: bool,
}

/// Superseded session whose play request has not settled yet
#[derive(Debug, Clone, Copy)]
struct RetiringSession {
    id: SessionId,
    request: RequestId,
}

/// Client playback controller
///
/// Single-threaded and callback driven: every mutating call takes
/// `&mut self`, and the backend reports back through
/// [`handle_backend_event`](Self::handle_backend_event).
///
/// At most one session is open at a time. Starting a track while the
/// previous session still has a play request in flight defers the new
/// session until that request settles and the old session is released.
pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    rng: StdRng,

    status: PlaybackStatus,
    current_track: Option<Track>,
    active_list: ActiveList,
    position_secs: f64,
    duration_secs: f64,

    session: Option<LiveSession>,
    retiring: Option<RetiringSession>,
    /// `current_track` waits for `retiring` to settle before its session opens
    deferred_start: bool,

    next_session: u64,
    next_request: u64,

    events: EventHub,
}

impl<B: MediaBackend> PlaybackController<B> {
    /// Create a controller driving `backend`
    pub fn new(backend: B, config: PlaybackConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            backend,
            rng,
            status: PlaybackStatus::Idle,
            current_track: None,
            active_list: ActiveList::default(),
            position_secs: 0.0,
            duration_secs: 0.0,
            session: None,
            retiring: None,
            deferred_start: false,
            next_session: 1,
            next_request: 1,
            events: EventHub::new(config.event_queue_limit),
        }
    }

    // ===== Transport =====

    /// Start `track`, navigating `list` afterwards
    ///
    /// A track without an audio URL is ignored and leaves the state untouched.
    pub fn play(&mut self, track: Track, list: ActiveList) {
        if !track.is_playable() {
            debug!(track_id = %track.id, "Ignoring play for track without audio URL");
            return;
        }

        self.retire_live_session();

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        let track_id = track.id.clone();
        self.current_track = Some(track);
        self.active_list = list;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;

        self.publish(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
        self.set_status(PlaybackStatus::Loading);
        self.publish_position();

        if self.deferred_start {
            debug!("Deferring session start until the previous play request settles");
        } else {
            self.open_session();
        }
    }

    /// The "click a song" action: toggle if it is already current, else play it
    pub fn select(&mut self, track: Track, list: ActiveList) {
        let is_current = self
            .current_track
            .as_ref()
            .is_some_and(|current| current.id == track.id);

        if is_current {
            self.toggle_play_pause();
        } else {
            self.play(track, list);
        }
    }

    /// Pause when playing, resume otherwise
    ///
    /// Toggles while a play request is in flight are coalesced into it.
    pub fn toggle_play_pause(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        if self.has_outstanding_request() {
            debug!("Coalescing toggle into in-flight play request");
            return;
        }

        match self.status {
            PlaybackStatus::Playing => {
                if let Some(live) = self.session {
                    self.backend.pause(live.id);
                }
                self.set_status(PlaybackStatus::Paused);
            }
            PlaybackStatus::Paused | PlaybackStatus::Idle | PlaybackStatus::Loading => {
                if let Some(id) = self.session.map(|live| live.id) {
                    let request = self.issue_request();
                    self.backend.request_play(id, request);
                    if let Some(live) = self.session.as_mut() {
                        live.pending_request = Some(request);
                        live.finished = false;
                    }
                } else {
                    self.open_session();
                }
                self.set_status(PlaybackStatus::Loading);
            }
        }
    }

    /// Seek to a fraction of the known duration
    ///
    /// No-op while the duration is unknown or no session is open.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);

        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return;
        }
        let Some(live) = self.session else {
            return;
        };

        let target = fraction * self.duration_secs;
        self.backend.seek(live.id, target);
        self.position_secs = target;
        self.publish_position();
    }

    /// Seek from a pointer position on a progress bar of `width`
    pub fn seek_from_pointer(&mut self, offset_x: f64, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        self.seek(offset_x / width);
    }

    /// Advance according to the active list's policy
    pub fn next(&mut self) {
        let Some(current) = self.current_track.as_ref() else {
            return;
        };
        if self.active_list.is_empty() {
            return;
        }

        let index = self.active_list.position_of(&current.id);
        let target = advance_index(
            self.active_list.policy(),
            &mut self.rng,
            index,
            self.active_list.len(),
        );
        self.play_index(target);
    }

    /// Step back; always sequential
    pub fn previous(&mut self) {
        let Some(current) = self.current_track.as_ref() else {
            return;
        };
        if self.active_list.is_empty() {
            return;
        }

        let index = self.active_list.position_of(&current.id);
        let target = sequential_previous(index, self.active_list.len());
        self.play_index(target);
    }

    /// Release every session and return to `Idle` with nothing loaded
    pub fn shutdown(&mut self) {
        self.release_all();
        self.deferred_start = false;

        self.current_track = None;
        self.active_list = ActiveList::default();
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.set_status(PlaybackStatus::Idle);
    }

    // ===== Backend notifications =====

    /// Apply a notification reported by the backend
    ///
    /// Notifications for superseded sessions or requests are discarded.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::PlaySettled {
                session,
                request,
                outcome,
            } => self.on_play_settled(session, request, outcome),
            BackendEvent::DurationChanged { session, secs } => {
                if !self.is_live(session) {
                    debug!(?session, "Ignoring duration of stale session");
                    return;
                }
                self.duration_secs = if secs.is_finite() && secs > 0.0 {
                    secs
                } else {
                    0.0
                };
                self.publish(PlaybackEvent::DurationChanged {
                    duration_secs: self.duration_secs,
                });
            }
            BackendEvent::TimeUpdate { session, secs } => {
                if !self.is_live(session) || !secs.is_finite() {
                    return;
                }
                self.position_secs = secs.max(0.0);
                self.publish_position();
            }
            BackendEvent::Ended { session } => self.on_ended(session),
        }
    }

    fn on_play_settled(
        &mut self,
        session: SessionId,
        request: RequestId,
        outcome: Result<(), PlaybackError>,
    ) {
        if let Some(retiring) = self.retiring {
            if retiring.id == session && retiring.request == request {
                debug!(?session, ?request, "Discarding outcome of superseded play request");
                self.retiring = None;
                self.backend.pause(session);
                self.backend.release(session);

                if self.deferred_start {
                    self.deferred_start = false;
                    self.open_session();
                }
                return;
            }
        }

        let Some(live) = self.session.as_mut() else {
            debug!(?session, ?request, "Ignoring settlement without a live session");
            return;
        };
        if live.id != session || live.pending_request != Some(request) {
            debug!(?session, ?request, "Ignoring stale play settlement");
            return;
        }
        live.pending_request = None;

        match outcome {
            Ok(()) => self.set_status(PlaybackStatus::Playing),
            Err(err) => {
                let track_id = self.current_track.as_ref().map(|t| t.id.clone());
                warn!(?track_id, error = %err, "Play request failed");
                self.set_status(PlaybackStatus::Paused);
                self.publish(PlaybackEvent::Error {
                    track_id,
                    message: err.to_string(),
                });
            }
        }
    }

    fn on_ended(&mut self, session: SessionId) {
        let Some(live) = self.session.as_mut() else {
            return;
        };
        if live.id != session || live.finished {
            debug!(?session, "Ignoring end of stale session");
            return;
        }
        live.finished = true;

        if self.duration_secs > 0.0 {
            self.position_secs = self.duration_secs;
        }
        self.set_status(PlaybackStatus::Paused);
        if let Some(track) = &self.current_track {
            let track_id = track.id.clone();
            self.publish(PlaybackEvent::TrackFinished { track_id });
        }

        self.next();
    }

    // ===== Subscribers =====

    /// Register a listener for every published event
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Returns false if the subscription was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain()
    }

    /// Check if there are queued events
    pub fn has_pending_events(&self) -> bool {
        self.events.has_pending()
    }

    // ===== Queries =====

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn active_list(&self) -> &ActiveList {
        &self.active_list
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Duration reported by the media; 0 while unknown
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Position as a fraction of the duration, in [0, 1]
    pub fn progress(&self) -> f64 {
        progress(self.position_secs, self.duration_secs)
    }

    /// Session bound to the current track, if one is open
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.map(|live| live.id)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let display_duration_secs = if self.duration_secs > 0.0 {
            self.duration_secs
        } else {
            self.current_track
                .as_ref()
                .map_or(0.0, |track| f64::from(track.duration_seconds))
        };

        PlaybackSnapshot {
            track: self.current_track.clone(),
            status: self.status,
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
            display_duration_secs,
            progress: self.progress(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ===== Internals =====

    fn has_outstanding_request(&self) -> bool {
        self.deferred_start
            || self
                .session
                .is_some_and(|live| live.pending_request.is_some())
    }

    fn is_live(&self, session: SessionId) -> bool {
        self.session.is_some_and(|live| live.id == session)
    }

    fn issue_request(&mut self) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        request
    }

    /// Detach the live session ahead of a new track
    fn retire_live_session(&mut self) {
        let Some(live) = self.session.take() else {
            return;
        };

        match live.pending_request {
            Some(request) => {
                if let Some(stale) = self.retiring.replace(RetiringSession {
                    id: live.id,
                    request,
                }) {
                    // Unreachable while deferred starts open no session; release anyway
                    self.backend.release(stale.id);
                }
                self.deferred_start = true;
            }
            None => {
                self.backend.pause(live.id);
                self.backend.release(live.id);
            }
        }
    }

    /// Open a session for `current_track` and request playback
    fn open_session(&mut self) {
        let Some(url) = self
            .current_track
            .as_ref()
            .and_then(Track::playable_url)
            .map(str::to_owned)
        else {
            return;
        };

        let id = SessionId(self.next_session);
        self.next_session += 1;
        self.backend.open(id, &url);

        let request = self.issue_request();
        self.backend.request_play(id, request);
        self.session = Some(LiveSession {
            id,
            pending_request: Some(request),
            finished: false,
        });
    }

    fn play_index(&mut self, target: Option<usize>) {
        let Some(track) = target.and_then(|index| self.active_list.get(index)).cloned() else {
            return;
        };
        let list = self.active_list.clone();
        self.play(track, list);
    }

    fn release_all(&mut self) {
        if let Some(live) = self.session.take() {
            if live.pending_request.is_none() {
                self.backend.pause(live.id);
            }
            self.backend.release(live.id);
        }
        if let Some(retiring) = self.retiring.take() {
            self.backend.release(retiring.id);
        }
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.status != status {
            self.status = status;
            self.publish(PlaybackEvent::StateChanged { status });
        }
    }

    fn publish_position(&mut self) {
        let event = PlaybackEvent::PositionChanged {
            position_secs: self.position_secs,
            progress: self.progress(),
        };
        self.publish(event);
    }

    fn publish(&mut self, event: PlaybackEvent) {
        self.events.publish(event);
    }
}

impl<B: MediaBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<B: MediaBackend + std::fmt::Debug> std::fmt::Debug for PlaybackController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("backend", &self.backend)
            .field("status", &self.status)
            .field("current_track", &self.current_track.as_ref().map(|t| &t.id))
            .field("position_secs", &self.position_secs)
            .field("duration_secs", &self.duration_secs)
            .field("session", &self.session)
            .field("retiring", &self.retiring)
            .field("deferred_start", &self.deferred_start)
            .finish_non_exhaustive()
    }
}
