#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc)]

//! Playback session controller.
//!
//! Owns the lifecycle of one playback attempt against a borrowed render
//! surface: picks the engine or native path, attaches it, classifies engine
//! faults, and tears everything down when the URL changes or the owner
//! unmounts. Capabilities (render surface, streaming engine) are traits
//! implemented by the embedding UI layer.

mod error;
mod events;
mod types;

pub mod impls;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ErrorCategory, PlayError, PlaybackError};
pub use events::SessionEvent;
pub use impls::{
    adapter::{EngineHandle, classify_fault},
    config::{EngineConfig, SessionConfig},
    controls::ControlsVisibility,
    native::NativeFallback,
    path::PlaybackPath,
    session::{PlaybackSession, SessionController, SurfaceOf},
    transport::Transport,
};
pub use traits::{
    engine::{EngineCapability, EngineEvent, EngineFault, FaultDetail, FaultKind, StreamEngine},
    surface::{RenderSurface, SurfaceEvent},
};
pub use types::{
    CanPlayType, HLS_MIME_TYPE, MediaKind, Notice, PathKind, PlaybackRequest, SessionId,
    SessionState,
};
