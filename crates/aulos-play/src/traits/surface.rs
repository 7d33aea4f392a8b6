use aulos_platform::MaybeSend;

use crate::{error::PlayError, types::CanPlayType};

/// Platform media-presentation element the session binds to.
///
/// Owned by the UI layer; the controller holds a handle and mutates it only
/// through these operations.
#[cfg_attr(test, unimock::unimock(api = RenderSurfaceMock))]
pub trait RenderSurface: MaybeSend + 'static {
    // -- source --

    fn set_source(&mut self, url: &str);

    fn clear_source(&mut self);

    fn can_play_type(&self, mime: &str) -> CanPlayType;

    // -- transport --

    /// Start playback. Rejected under autoplay policy.
    fn play(&mut self) -> Result<(), PlayError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    // -- timing --

    fn current_time(&self) -> f64;

    /// Move the playhead. The surface clamps out-of-range values.
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds; `NaN` before metadata is known.
    fn duration(&self) -> f64;

    // -- volume --

    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    // -- fullscreen --

    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), PlayError>;

    fn exit_fullscreen(&mut self);
}

/// Events raised by the render surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceEvent {
    TimeUpdate,
    DurationChange,
    Play,
    Pause,
    VolumeChange,
    LoadedMetadata,
    Error {
        code: Option<u16>,
        message: Option<String>,
    },
}
