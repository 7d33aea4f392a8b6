//! Stream engine adapter.
//!
//! [`EngineHandle`] owns one engine instance for one session. It builds the
//! engine from the capability, binds it to the surface, starts the manifest
//! load, and turns raw engine events into [`EngineOutcome`]s the session
//! applies. Fault classification lives in [`classify_fault`].

use tracing::{debug, warn};

use crate::{
    error::{ErrorCategory, PlaybackError},
    impls::config::EngineConfig,
    traits::{
        engine::{EngineCapability, EngineEvent, EngineFault, FaultDetail, FaultKind, StreamEngine},
        surface::RenderSurface,
    },
    types::SessionId,
};

/// What the session should do in response to an engine event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EngineOutcome {
    /// Manifest parsed: stop loading and start playback.
    Ready,
    /// A fragment reached the buffer.
    Buffered,
    /// Non-fatal fault: report, keep playing.
    Transient(PlaybackError),
    /// Fatal media fault handed to the engine's recovery.
    Recovering(PlaybackError),
    /// Session must end.
    Fatal(PlaybackError),
    /// Event for a released engine.
    Ignored,
}

/// Adapter-owned handle to one engine instance.
pub struct EngineHandle<E: StreamEngine> {
    engine: Option<E>,
    session: SessionId,
    recovery_attempted: bool,
}

impl<E: StreamEngine> EngineHandle<E> {
    /// Construct an engine, bind it to `surface` and begin loading `url`.
    ///
    /// Returns as soon as the load is issued; progress arrives as events.
    /// Construction failure is a fatal [`ErrorCategory::Init`] error.
    pub fn attach<C>(
        capability: &C,
        config: &EngineConfig,
        url: &str,
        surface: &E::Surface,
        session: SessionId,
    ) -> Result<Self, PlaybackError>
    where
        C: EngineCapability<Engine = E>,
    {
        let mut engine = capability.create(config).map_err(|e| {
            PlaybackError::fatal(
                ErrorCategory::Init,
                format!("failed to initialize the player: {e}"),
            )
        })?;
        engine.attach_media(surface);
        engine.load_source(url);
        debug!(session = session.0, url, "engine attached");
        Ok(Self::from_engine(engine, session))
    }

    pub(crate) fn from_engine(engine: E, session: SessionId) -> Self {
        Self {
            engine: Some(engine),
            session,
            recovery_attempted: false,
        }
    }

    /// Handle for a session whose engine never came up.
    pub(crate) fn detached(session: SessionId) -> Self {
        Self {
            engine: None,
            session,
            recovery_attempted: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub(crate) fn on_event(&mut self, event: EngineEvent) -> EngineOutcome {
        let Some(engine) = self.engine.as_mut() else {
            debug!(session = self.session.0, ?event, "event for released engine");
            return EngineOutcome::Ignored;
        };

        let fault = match event {
            EngineEvent::ManifestParsed => return EngineOutcome::Ready,
            EngineEvent::FragmentBuffered => return EngineOutcome::Buffered,
            EngineEvent::Fault(fault) => fault,
        };

        let error = classify_fault(&fault);
        if !error.fatal {
            return EngineOutcome::Transient(error);
        }
        if error.category != ErrorCategory::Media {
            return EngineOutcome::Fatal(error);
        }
        if self.recovery_attempted {
            debug!(session = self.session.0, "media recovery budget spent");
            return EngineOutcome::Fatal(error);
        }

        self.recovery_attempted = true;
        match engine.recover_media_error() {
            Ok(()) => EngineOutcome::Recovering(error),
            Err(e) => {
                warn!(session = self.session.0, %e, "media recovery not possible");
                EngineOutcome::Fatal(error)
            }
        }
    }

    /// Destroy the engine and clear the surface source.
    ///
    /// Idempotent: the engine is destroyed at most once.
    pub fn detach(&mut self, surface: &mut E::Surface) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            debug!(session = self.session.0, "engine destroyed");
        }
        surface.clear_source();
    }
}

/// Map an engine fault onto the playback error taxonomy.
///
/// Manifest faults and other network-layer faults are
/// [`ErrorCategory::Network`]; media-layer and buffer faults are
/// [`ErrorCategory::Media`]; everything else is [`ErrorCategory::Playback`].
/// The engine's fatal flag is kept as is.
#[must_use]
pub fn classify_fault(fault: &EngineFault) -> PlaybackError {
    let (category, detail) = match (&fault.kind, &fault.detail) {
        (_, FaultDetail::ManifestLoadError) => {
            let code = fault
                .response_code
                .map_or_else(|| "unknown".to_string(), |code| code.to_string());
            (
                ErrorCategory::Network,
                format!(
                    "could not load the manifest; check the URL and that the server allows \
                     cross-origin requests (response code: {code})"
                ),
            )
        }
        (_, FaultDetail::ManifestLoadTimeout) => (
            ErrorCategory::Network,
            "timed out loading the manifest; check your connection or the server status"
                .to_string(),
        ),
        (_, FaultDetail::ManifestParsingError) => (
            ErrorCategory::Network,
            "could not parse the manifest; the file may be malformed or not an HLS stream"
                .to_string(),
        ),
        (FaultKind::Network, detail) => (
            ErrorCategory::Network,
            format!("{detail}; check your connection and the stream URL"),
        ),
        (FaultKind::Media, detail) => (
            ErrorCategory::Media,
            format!("{detail}; the stream format may not be supported"),
        ),
        (_, detail) if detail.is_buffer() => (
            ErrorCategory::Media,
            format!("{detail}; the stream format may not be supported"),
        ),
        (_, detail) => (ErrorCategory::Playback, detail.to_string()),
    };

    PlaybackError {
        category,
        detail,
        fatal: fault.fatal,
    }
}
