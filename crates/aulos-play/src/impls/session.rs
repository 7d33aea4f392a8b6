//! Playback session state machine.
//!
//! [`SessionController`] owns at most one live [`PlaybackSession`] per render
//! surface. Every new request tears the previous session down synchronously
//! before anything is attached, so at most one engine instance exists at a
//! time. Engine and surface callbacks are delivered as method calls; the
//! resulting field changes are published as [`SessionEvent`]s.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    error::PlaybackError,
    events::SessionEvent,
    impls::{
        adapter::EngineOutcome,
        config::SessionConfig,
        controls::ControlsVisibility,
        native::NativeOutcome,
        path::PlaybackPath,
        transport::Transport,
    },
    traits::{
        engine::{EngineCapability, EngineEvent, StreamEngine},
        surface::{RenderSurface, SurfaceEvent},
    },
    types::{PathKind, PlaybackRequest, SessionId, SessionState},
};

/// Render surface type bound to a capability's engine.
pub type SurfaceOf<C> = <<C as EngineCapability>::Engine as StreamEngine>::Surface;

/// Snapshot of one playback attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSession {
    pub(crate) id: SessionId,
    pub(crate) request: PlaybackRequest,
    pub(crate) path: PathKind,
    pub(crate) loading: bool,
    pub(crate) error: Option<PlaybackError>,
    pub(crate) is_playing: bool,
    pub(crate) duration: f64,
    pub(crate) current_time: f64,
    pub(crate) volume: f64,
}

impl PlaybackSession {
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn request(&self) -> &PlaybackRequest {
        &self.request
    }

    #[must_use]
    pub fn path(&self) -> PathKind {
        self.path
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&PlaybackError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Seconds; `0.0` until the surface reports a finite duration.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.error.as_ref().is_some_and(|e| e.fatal)
    }

    /// State derived from the session fields. Errors win over loading.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.error {
            Some(error) if error.fatal => SessionState::ErrorFatal,
            Some(_) => SessionState::ErrorTransient,
            None if self.loading => SessionState::Buffering,
            None if self.is_playing => SessionState::Playing,
            None => SessionState::Paused,
        }
    }

    fn mirror_time(&mut self, seconds: f64) {
        self.current_time = clamp_time(seconds, self.duration);
    }
}

/// Session plus the last published copy of it.
#[derive(Debug)]
pub(crate) struct TrackedSession {
    pub(crate) session: PlaybackSession,
    published: PlaybackSession,
    state: SessionState,
}

impl TrackedSession {
    fn new(session: PlaybackSession) -> Self {
        Self {
            published: session.clone(),
            session,
            state: SessionState::Initializing,
        }
    }

    /// Publish one event per field that changed since the last call.
    pub(crate) fn publish_changes(&mut self, tx: &broadcast::Sender<SessionEvent>) {
        let id = self.session.id;
        let now = &self.session;
        let before = &self.published;
        let mut events = Vec::new();

        if now.error != before.error {
            events.push(match &now.error {
                Some(error) => SessionEvent::Error {
                    session: id,
                    error: error.clone(),
                },
                None => SessionEvent::ErrorCleared { session: id },
            });
        }
        if now.loading != before.loading {
            events.push(SessionEvent::LoadingChanged {
                session: id,
                loading: now.loading,
            });
        }
        if now.is_playing != before.is_playing {
            events.push(SessionEvent::PlayingChanged {
                session: id,
                playing: now.is_playing,
            });
        }
        if now.duration != before.duration {
            events.push(SessionEvent::DurationChanged {
                session: id,
                duration: now.duration,
            });
        }
        if now.current_time != before.current_time {
            events.push(SessionEvent::TimeUpdated {
                session: id,
                current_time: now.current_time,
            });
        }
        if now.volume != before.volume {
            events.push(SessionEvent::VolumeChanged {
                session: id,
                volume: now.volume,
            });
        }
        let state = now.state();
        if state != self.state {
            debug!(session = id.0, from = ?self.state, to = ?state, "session state changed");
            self.state = state;
            events.push(SessionEvent::StateChanged { session: id, state });
        }

        self.published = self.session.clone();
        for event in events {
            let _ = tx.send(event);
        }
    }
}

struct Active<E: StreamEngine> {
    tracked: TrackedSession,
    path: PlaybackPath<E>,
}

impl<E: StreamEngine> Active<E> {
    /// Loading finished: issue play. A rejected play only leaves the session paused.
    fn start_playback(&mut self, surface: &mut E::Surface) {
        let session = &mut self.tracked.session;
        session.loading = false;
        if let Err(e) = surface.play() {
            warn!(session = session.id.0, %e, "autoplay rejected");
            session.is_playing = false;
        }
    }

    fn fail(&mut self, surface: &mut E::Surface, error: PlaybackError) {
        let session = &mut self.tracked.session;
        warn!(
            session = session.id.0,
            category = %error.category,
            detail = %error.detail,
            "fatal playback error"
        );
        session.loading = false;
        session.is_playing = false;
        session.error = Some(error);
        self.path.detach(surface);
    }
}

/// Owner of the playback lifecycle for one render surface.
pub struct SessionController<C: EngineCapability> {
    capability: C,
    surface: SurfaceOf<C>,
    config: SessionConfig,
    active: Option<Active<C::Engine>>,
    next_id: u64,
    events_tx: broadcast::Sender<SessionEvent>,
    controls: ControlsVisibility,
}

impl<C: EngineCapability> SessionController<C> {
    pub fn new(capability: C, surface: SurfaceOf<C>, config: SessionConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.events_capacity.max(1));
        let controls = ControlsVisibility::new(config.controls_hide_delay, events_tx.clone());
        Self {
            capability,
            surface,
            config,
            active: None,
            next_id: 1,
            events_tx,
            controls,
        }
    }

    /// Start a new session for `request`, replacing the current one.
    ///
    /// A blank URL is a no-op and returns `None`. Otherwise the previous
    /// session is fully torn down before the new path attaches.
    pub fn request(&mut self, request: PlaybackRequest) -> Option<SessionId> {
        if request.is_blank() {
            debug!("blank request ignored");
            return None;
        }
        self.teardown();

        let id = SessionId(self.next_id);
        self.next_id += 1;
        info!(session = id.0, url = request.url(), kind = ?request.kind(), "playback requested");
        let _ = self.events_tx.send(SessionEvent::StateChanged {
            session: id,
            state: SessionState::Initializing,
        });

        let (path, error) = PlaybackPath::open(
            &self.capability,
            &self.config.engine,
            &request,
            &mut self.surface,
            id,
        );
        let kind = path.kind();
        info!(session = id.0, path = ?kind, "playback path selected");
        let _ = self.events_tx.send(SessionEvent::Started {
            session: id,
            url: request.url().to_string(),
            path: kind,
        });

        let session = PlaybackSession {
            id,
            request,
            path: kind,
            loading: false,
            error: None,
            is_playing: false,
            duration: 0.0,
            current_time: 0.0,
            volume: self.surface.volume().clamp(0.0, 1.0),
        };
        let mut active = Active {
            tracked: TrackedSession::new(session),
            path,
        };
        match error {
            Some(error) => active.fail(&mut self.surface, error),
            None => active.tracked.session.loading = true,
        }
        active.tracked.publish_changes(&self.events_tx);
        self.active = Some(active);
        Some(id)
    }

    /// Deliver an engine event raised for session `session`.
    ///
    /// Events for any session other than the active one are dropped.
    pub fn on_engine_event(&mut self, session: SessionId, event: EngineEvent) {
        let Some(active) = self.active.as_mut() else {
            debug!(session = session.0, ?event, "engine event without a session");
            return;
        };
        if active.tracked.session.id != session {
            debug!(session = session.0, ?event, "stale engine event dropped");
            return;
        }
        let PlaybackPath::Engine(handle) = &mut active.path else {
            debug!(session = session.0, ?event, "engine event on a non-engine path");
            return;
        };

        match handle.on_event(event) {
            EngineOutcome::Ready => {
                debug!(session = session.0, "manifest parsed");
                active.start_playback(&mut self.surface);
            }
            EngineOutcome::Buffered => {
                let current = &mut active.tracked.session;
                if self.config.clear_transient_on_recovery
                    && current.error.as_ref().is_some_and(|e| !e.fatal)
                {
                    debug!(session = session.0, "transient error cleared by buffered fragment");
                    current.error = None;
                }
            }
            EngineOutcome::Transient(error) => {
                warn!(
                    session = session.0,
                    category = %error.category,
                    detail = %error.detail,
                    "transient playback error"
                );
                active.tracked.session.error = Some(error);
            }
            EngineOutcome::Recovering(error) => {
                warn!(session = session.0, detail = %error.detail, "attempting media recovery");
                let _ = self
                    .events_tx
                    .send(SessionEvent::RecoveryAttempted { session, error });
            }
            EngineOutcome::Fatal(error) => {
                active.fail(&mut self.surface, error);
                self.controls.reset();
            }
            EngineOutcome::Ignored => {}
        }
        active.tracked.publish_changes(&self.events_tx);
    }

    /// Deliver a render surface event.
    pub fn on_surface_event(&mut self, event: SurfaceEvent) {
        if matches!(event, SurfaceEvent::Pause) {
            self.controls.reset();
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let fatal = active.tracked.session.is_fatal();
        let session = &mut active.tracked.session;

        match &event {
            SurfaceEvent::TimeUpdate => session.mirror_time(self.surface.current_time()),
            SurfaceEvent::DurationChange => {
                session.duration = sanitize_duration(self.surface.duration());
                session.mirror_time(session.current_time);
            }
            SurfaceEvent::VolumeChange => session.volume = self.surface.volume().clamp(0.0, 1.0),
            SurfaceEvent::Play if !fatal => session.is_playing = true,
            SurfaceEvent::Pause if !fatal => session.is_playing = false,
            SurfaceEvent::LoadedMetadata | SurfaceEvent::Error { .. } if !fatal => {
                let outcome = match &active.path {
                    PlaybackPath::Native(native) => native.on_surface_event(&event),
                    _ => NativeOutcome::Ignored,
                };
                match outcome {
                    NativeOutcome::Ready => {
                        debug!(session = session_id(active), "native metadata loaded");
                        active.start_playback(&mut self.surface);
                    }
                    NativeOutcome::Fatal(error) => {
                        active.fail(&mut self.surface, error);
                        self.controls.reset();
                    }
                    NativeOutcome::Ignored => {}
                }
            }
            _ => {}
        }
        active.tracked.publish_changes(&self.events_tx);
    }

    /// Release the active session: engine destroyed, source cleared.
    ///
    /// Idempotent. Also stops the controls timer.
    pub fn teardown(&mut self) {
        self.controls.reset();
        let Some(mut active) = self.active.take() else {
            return;
        };
        let id = active.tracked.session.id;
        active.path.detach(&mut self.surface);
        info!(session = id.0, "session torn down");
        let _ = self.events_tx.send(SessionEvent::StateChanged {
            session: id,
            state: SessionState::Idle,
        });
        let _ = self.events_tx.send(SessionEvent::TornDown { session: id });
    }

    /// Owner is going away. Same as [`teardown`](Self::teardown).
    pub fn unmount(&mut self) {
        self.teardown();
    }

    #[must_use]
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.active.as_ref().map(|active| &active.tracked.session)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session()
            .map_or(SessionState::Idle, PlaybackSession::state)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    pub fn transport(&mut self) -> Transport<'_, SurfaceOf<C>> {
        Transport::new(
            &mut self.surface,
            self.active.as_mut().map(|active| &mut active.tracked),
            &self.events_tx,
        )
    }

    pub fn on_pointer_move(&mut self) {
        let playing = self.is_playing();
        self.controls.pointer_moved(playing);
    }

    pub fn on_pointer_leave(&mut self) {
        let playing = self.is_playing();
        self.controls.pointer_left(playing);
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible(self.is_playing())
    }

    #[must_use]
    pub fn controls(&self) -> &ControlsVisibility {
        &self.controls
    }

    #[must_use]
    pub fn surface(&self) -> &SurfaceOf<C> {
        &self.surface
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn is_playing(&self) -> bool {
        self.session().is_some_and(PlaybackSession::is_playing)
    }
}

impl<C: EngineCapability> Drop for SessionController<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn session_id<E: StreamEngine>(active: &Active<E>) -> u64 {
    active.tracked.session.id.0
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

fn clamp_time(seconds: f64, duration: f64) -> f64 {
    if seconds.is_nan() {
        return 0.0;
    }
    if duration > 0.0 {
        seconds.clamp(0.0, duration)
    } else {
        seconds.max(0.0)
    }
}
