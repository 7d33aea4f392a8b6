//! Engine and session configuration.

use std::time::Duration;

use derivative::Derivative;
use derive_setters::Setters;

/// Configuration handed to [`EngineCapability::create`](crate::EngineCapability::create).
#[derive(Clone, Debug, Derivative, PartialEq, Eq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct EngineConfig {
    /// Manifest load retries before the engine reports a fatal fault. Default: 3.
    #[derivative(Default(value = "3"))]
    pub max_manifest_retries: u32,
    /// Variant playlist load retries. Default: 3.
    #[derivative(Default(value = "3"))]
    pub max_level_retries: u32,
    /// Fragment load retries. Default: 3.
    #[derivative(Default(value = "3"))]
    pub max_fragment_retries: u32,
    /// Send credentials with cross-origin requests. Default: false.
    pub cross_origin_credentials: bool,
}

/// Configuration for [`SessionController`](crate::SessionController).
#[derive(Clone, Debug, Derivative, PartialEq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct SessionConfig {
    /// Passed to the engine on every session.
    pub engine: EngineConfig,
    /// Pointer inactivity before controls hide while playing. Default: 3s.
    #[derivative(Default(value = "Duration::from_secs(3)"))]
    pub controls_hide_delay: Duration,
    /// Clear a transient error on the first buffered fragment after it. Default: true.
    #[derivative(Default(value = "true"))]
    pub clear_transient_on_recovery: bool,
    /// Event channel capacity. Default: 64.
    #[derivative(Default(value = "64"))]
    pub events_capacity: usize,
}
