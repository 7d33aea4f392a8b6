use aulos_history::{HistoryStore, PlayHistory};
use aulos_play::{
    EngineCapability, PlaybackRequest, SessionController, SessionId, SurfaceOf,
};
use aulos_proxy::ProxyRewrite;
use tracing::{debug, warn};

use crate::{
    config::DeckConfig,
    input::{self, InputError},
};

/// Player front: validated input goes through the proxy rewrite into the
/// history and then to the session controller.
///
/// The controller never sees raw input; it only receives final URLs.
pub struct Deck<C: EngineCapability, H: HistoryStore> {
    controller: SessionController<C>,
    history: PlayHistory<H>,
    rewrite: ProxyRewrite,
    use_proxy: bool,
}

impl<C: EngineCapability, H: HistoryStore> Deck<C, H> {
    pub fn new(capability: C, surface: SurfaceOf<C>, store: H, config: DeckConfig) -> Self {
        Self {
            controller: SessionController::new(capability, surface, config.session),
            history: PlayHistory::open(store),
            rewrite: ProxyRewrite::new(config.proxy_base),
            use_proxy: config.use_proxy,
        }
    }

    /// Validate `input`, record it and start playback.
    ///
    /// A history that cannot be saved does not stop playback.
    pub fn submit(&mut self, input: &str) -> Result<SessionId, InputError> {
        let url = input::validate(input)?;
        let target = if self.use_proxy {
            self.rewrite.rewrite(&url)
        } else {
            input.trim().to_string()
        };
        debug!(input = input.trim(), target, proxied = self.use_proxy, "url submitted");

        if let Err(e) = self.history.record(&target) {
            warn!(%e, "failed to persist play history");
        }
        self.controller
            .request(PlaybackRequest::detect(&target))
            .ok_or(InputError::Empty)
    }

    /// Replay the history entry at `index` as is, without recording it again.
    pub fn select_history(&mut self, index: usize) -> Option<SessionId> {
        let url = self.history.entries().get(index)?.clone();
        self.controller.request(PlaybackRequest::detect(&url))
    }

    pub fn set_use_proxy(&mut self, use_proxy: bool) {
        self.use_proxy = use_proxy;
    }

    #[must_use]
    pub fn use_proxy(&self) -> bool {
        self.use_proxy
    }

    pub fn history(&self) -> &PlayHistory<H> {
        &self.history
    }

    pub fn controller(&self) -> &SessionController<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController<C> {
        &mut self.controller
    }
}
