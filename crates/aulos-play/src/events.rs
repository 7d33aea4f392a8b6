use crate::{
    error::PlaybackError,
    types::{Notice, PathKind, SessionId, SessionState},
};

/// Updates published by [`SessionController`](crate::SessionController).
///
/// Delivered over a `tokio::sync::broadcast` channel; publishing without
/// subscribers is silent.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum SessionEvent {
    /// A session was created and its path selected.
    Started {
        session: SessionId,
        url: String,
        path: PathKind,
    },
    StateChanged {
        session: SessionId,
        state: SessionState,
    },
    LoadingChanged {
        session: SessionId,
        loading: bool,
    },
    PlayingChanged {
        session: SessionId,
        playing: bool,
    },
    TimeUpdated {
        session: SessionId,
        current_time: f64,
    },
    DurationChanged {
        session: SessionId,
        duration: f64,
    },
    VolumeChanged {
        session: SessionId,
        volume: f64,
    },
    Error {
        session: SessionId,
        error: PlaybackError,
    },
    ErrorCleared {
        session: SessionId,
    },
    /// A fatal media fault was handed to the engine for recovery.
    RecoveryAttempted {
        session: SessionId,
        error: PlaybackError,
    },
    /// The session released its engine and cleared the surface.
    TornDown {
        session: SessionId,
    },
    ControlsVisibilityChanged {
        visible: bool,
    },
    Notice(Notice),
}
