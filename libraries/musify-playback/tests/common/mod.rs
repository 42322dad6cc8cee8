//! Shared test helpers for playback integration tests

#![allow(dead_code)]

use musify_core::{Track, TrackId};
use musify_playback::{
    ActiveList, BackendEvent, MediaBackend, PlaybackConfig, PlaybackController, PlaybackError,
    RequestId, SessionId,
};
use std::collections::BTreeSet;

/// Call observed by the recording backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Open(SessionId, String),
    RequestPlay(SessionId, RequestId),
    Pause(SessionId),
    Seek(SessionId, f64),
    Release(SessionId),
}

/// Backend double that records every call and tracks open sessions
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    pub open_sessions: BTreeSet<SessionId>,
}

impl RecordingBackend {
    /// Most recent play request
    pub fn last_request(&self) -> (SessionId, RequestId) {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                BackendCall::RequestPlay(session, request) => Some((*session, *request)),
                _ => None,
            })
            .expect("no play request recorded")
    }

    pub fn request_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::RequestPlay(..)))
            .count()
    }

    /// URLs of every opened session, in order
    pub fn opened_urls(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Open(_, url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl MediaBackend for RecordingBackend {
    fn open(&mut self, session: SessionId, url: &str) {
        assert!(
            self.open_sessions.is_empty(),
            "session {session:?} opened while {:?} still open",
            self.open_sessions
        );
        self.open_sessions.insert(session);
        self.calls.push(BackendCall::Open(session, url.to_string()));
    }

    fn request_play(&mut self, session: SessionId, request: RequestId) {
        self.calls.push(BackendCall::RequestPlay(session, request));
    }

    fn pause(&mut self, session: SessionId) {
        self.calls.push(BackendCall::Pause(session));
    }

    fn seek(&mut self, session: SessionId, position_secs: f64) {
        self.calls.push(BackendCall::Seek(session, position_secs));
    }

    fn release(&mut self, session: SessionId) {
        self.open_sessions.remove(&session);
        self.calls.push(BackendCall::Release(session));
    }
}

pub type TestController = PlaybackController<RecordingBackend>;

pub fn controller() -> TestController {
    controller_with_seed(7)
}

pub fn controller_with_seed(seed: u64) -> TestController {
    PlaybackController::new(
        RecordingBackend::default(),
        PlaybackConfig {
            shuffle_seed: Some(seed),
            ..PlaybackConfig::default()
        },
    )
}

pub fn track(id: &str) -> Track {
    Track::new(TrackId::new(id), format!("Song {id}"), "Artist")
        .with_audio_url(format!("https://cdn.example.com/audio/{id}.mp3"))
        .with_duration(180)
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// Settle the most recent play request with `outcome`
pub fn settle_last(controller: &mut TestController, outcome: Result<(), PlaybackError>) {
    let (session, request) = controller.backend().last_request();
    controller.handle_backend_event(BackendEvent::PlaySettled {
        session,
        request,
        outcome,
    });
}

/// Play `id` from `list` and confirm the start
pub fn play_confirmed(controller: &mut TestController, id: &str, list: ActiveList) {
    controller.play(track(id), list);
    settle_last(controller, Ok(()));
}

pub fn current_id(controller: &TestController) -> Option<String> {
    controller
        .current_track()
        .map(|track| track.id.as_str().to_string())
}

pub fn report_duration(controller: &mut TestController, secs: f64) {
    let session = controller.session_id().expect("no live session");
    controller.handle_backend_event(BackendEvent::DurationChanged { session, secs });
}

pub fn end_current(controller: &mut TestController) {
    let session = controller.session_id().expect("no live session");
    controller.handle_backend_event(BackendEvent::Ended { session });
}
