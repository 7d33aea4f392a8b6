//! Configuration for [`Deck`](crate::Deck).

use aulos_play::SessionConfig;
use aulos_proxy::DEFAULT_PROXY_BASE;
use derivative::Derivative;
use derive_setters::Setters;

#[derive(Clone, Debug, Derivative, PartialEq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct DeckConfig {
    /// Route submitted URLs through the CORS proxy. Default: true.
    #[derivative(Default(value = "true"))]
    pub use_proxy: bool,
    /// Default: `http://localhost:3001/proxy`.
    #[derivative(Default(value = "DEFAULT_PROXY_BASE.to_string()"))]
    #[setters(into)]
    pub proxy_base: String,
    pub session: SessionConfig,
}
