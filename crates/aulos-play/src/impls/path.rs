//! Per-session playback path, selected once by capability probe.

use tracing::debug;

use crate::{
    error::{ErrorCategory, PlaybackError},
    impls::{adapter::EngineHandle, config::EngineConfig, native::NativeFallback},
    traits::{
        engine::{EngineCapability, StreamEngine},
        surface::RenderSurface,
    },
    types::{MediaKind, PathKind, PlaybackRequest, SessionId},
};

pub enum PlaybackPath<E: StreamEngine> {
    Engine(EngineHandle<E>),
    Native(NativeFallback),
    Unsupported,
}

impl<E: StreamEngine> PlaybackPath<E> {
    /// Probe capabilities in order: adaptive engine, native surface, nothing.
    ///
    /// Only files with a known progressive extension skip the engine; any
    /// other URL may be a manifest and goes to the engine when it is
    /// supported.
    pub fn probe<C>(capability: &C, request: &PlaybackRequest, surface: &E::Surface) -> PathKind
    where
        C: EngineCapability<Engine = E>,
    {
        if request.kind() == MediaKind::AdaptiveStream && capability.is_supported() {
            return PathKind::EngineAttached;
        }
        let mime = request.native_mime();
        if surface.can_play_type(mime).is_playable() {
            return PathKind::NativeAttached;
        }
        debug!(mime, "no playback capability");
        PathKind::Unsupported
    }

    /// Select and attach a path for `request`.
    ///
    /// The returned error, if any, is fatal for the session. `Unsupported`
    /// performs no attach at all.
    pub fn open<C>(
        capability: &C,
        config: &EngineConfig,
        request: &PlaybackRequest,
        surface: &mut E::Surface,
        session: SessionId,
    ) -> (Self, Option<PlaybackError>)
    where
        C: EngineCapability<Engine = E>,
    {
        match Self::probe(capability, request, surface) {
            PathKind::EngineAttached => {
                match EngineHandle::attach(capability, config, request.url(), surface, session) {
                    Ok(handle) => (Self::Engine(handle), None),
                    Err(error) => (Self::Engine(EngineHandle::detached(session)), Some(error)),
                }
            }
            PathKind::NativeAttached => (
                Self::Native(NativeFallback::attach(request.url(), surface)),
                None,
            ),
            PathKind::Unsupported => (
                Self::Unsupported,
                Some(PlaybackError::fatal(
                    ErrorCategory::Unsupported,
                    "this platform cannot play the stream; neither adaptive streaming nor \
                     native playback is available",
                )),
            ),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PathKind {
        match self {
            Self::Engine(_) => PathKind::EngineAttached,
            Self::Native(_) => PathKind::NativeAttached,
            Self::Unsupported => PathKind::Unsupported,
        }
    }

    /// Release whatever the path attached. Idempotent.
    pub fn detach(&mut self, surface: &mut E::Surface) {
        match self {
            Self::Engine(handle) => handle.detach(surface),
            Self::Native(native) => native.detach(surface),
            Self::Unsupported => {}
        }
    }
}
