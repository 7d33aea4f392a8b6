#![forbid(unsafe_code)]

//! # Aulos
//!
//! Facade wiring a stream player together: URL input validation, optional
//! CORS proxy routing, play history, and the playback session controller.
//!
//! ## Quick start
//!
//! ```ignore
//! use aulos::prelude::*;
//!
//! let mut deck = Deck::new(capability, surface, MemoryHistoryStore::new(), DeckConfig::default());
//! let session = deck.submit("https://cdn.example/live/index.m3u8")?;
//!
//! // forward callbacks from the UI layer
//! deck.controller_mut().on_engine_event(session, EngineEvent::ManifestParsed);
//! deck.controller_mut().on_surface_event(SurfaceEvent::Play);
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod play {
    pub use aulos_play::*;
}

pub mod history {
    pub use aulos_history::*;
}

pub mod proxy {
    pub use aulos_proxy::*;
}

pub mod platform {
    pub use aulos_platform::*;
}

// ── Deck ────────────────────────────────────────────────────────────────

mod config;
mod deck;
pub mod input;

pub use config::DeckConfig;
pub use deck::Deck;
pub use input::InputError;

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use aulos_history::{HistoryStore, JsonFileHistoryStore, MemoryHistoryStore, PlayHistory};
    pub use aulos_play::{
        EngineCapability, EngineEvent, EngineFault, ErrorCategory, PlaybackError,
        PlaybackRequest, RenderSurface, SessionConfig, SessionController, SessionEvent,
        SessionId, SessionState, StreamEngine, SurfaceEvent,
    };
    pub use aulos_proxy::ProxyRewrite;

    pub use crate::{Deck, DeckConfig, InputError};
}
