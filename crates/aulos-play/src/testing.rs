//! Recording fakes for the capability traits.
//!
//! [`FakeSurface`] and [`FakeCapability`] write every capability call into a
//! shared [`CallLog`], so tests can assert ordering across the surface and
//! the engine (for example that a previous engine was destroyed before the
//! next one was created).

use std::sync::Arc;

use aulos_platform::Mutex;

use crate::{
    error::PlayError,
    impls::config::EngineConfig,
    traits::{
        engine::{EngineCapability, StreamEngine},
        surface::RenderSurface,
    },
    types::CanPlayType,
};

/// One recorded capability call. Engine calls carry the engine's creation index.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SetSource(String),
    ClearSource,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    RequestFullscreen,
    ExitFullscreen,
    EngineCreated(u64),
    AttachMedia(u64),
    LoadSource(u64, String),
    RecoverMediaError(u64),
    Destroy(u64),
}

#[derive(Clone, Debug, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().push(call);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().clone()
    }

    #[must_use]
    pub fn contains(&self, call: &Call) -> bool {
        self.0.lock().contains(call)
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

#[derive(Debug)]
struct SurfaceState {
    source: Option<String>,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    fullscreen: bool,
    reject_autoplay: bool,
    reject_fullscreen: bool,
    native_types: Vec<String>,
}

/// In-memory render surface. Clones share state.
#[derive(Clone, Debug)]
pub struct FakeSurface {
    log: CallLog,
    state: Arc<Mutex<SurfaceState>>,
}

impl FakeSurface {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            state: Arc::new(Mutex::new(SurfaceState {
                source: None,
                paused: true,
                current_time: 0.0,
                duration: f64::NAN,
                volume: 1.0,
                fullscreen: false,
                reject_autoplay: false,
                reject_fullscreen: false,
                native_types: Vec::new(),
            })),
        }
    }

    /// MIME types `can_play_type` answers `Maybe` for.
    #[must_use]
    pub fn with_native_types(self, types: &[&str]) -> Self {
        self.state.lock().native_types = types.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn rejecting_autoplay(self) -> Self {
        self.state.lock().reject_autoplay = true;
        self
    }

    #[must_use]
    pub fn rejecting_fullscreen(self) -> Self {
        self.state.lock().reject_fullscreen = true;
        self
    }

    pub fn set_duration(&self, duration: f64) {
        self.state.lock().duration = duration;
    }

    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.state.lock().source.clone()
    }

    #[must_use]
    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

impl RenderSurface for FakeSurface {
    fn set_source(&mut self, url: &str) {
        self.log.push(Call::SetSource(url.to_string()));
        self.state.lock().source = Some(url.to_string());
    }

    fn clear_source(&mut self) {
        self.log.push(Call::ClearSource);
        let mut state = self.state.lock();
        state.source = None;
        state.paused = true;
    }

    fn can_play_type(&self, mime: &str) -> CanPlayType {
        if self.state.lock().native_types.iter().any(|t| t == mime) {
            CanPlayType::Maybe
        } else {
            CanPlayType::Empty
        }
    }

    fn play(&mut self) -> Result<(), PlayError> {
        self.log.push(Call::Play);
        let mut state = self.state.lock();
        if state.reject_autoplay {
            return Err(PlayError::PlayRejected {
                reason: "play() can only be initiated by a user gesture".into(),
            });
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.push(Call::Pause);
        self.state.lock().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn current_time(&self) -> f64 {
        self.state.lock().current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.log.push(Call::Seek(seconds));
        let mut state = self.state.lock();
        state.current_time = if state.duration.is_finite() {
            seconds.clamp(0.0, state.duration.max(0.0))
        } else {
            seconds.max(0.0)
        };
    }

    fn duration(&self) -> f64 {
        self.state.lock().duration
    }

    fn volume(&self) -> f64 {
        self.state.lock().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.push(Call::SetVolume(volume));
        self.state.lock().volume = volume.clamp(0.0, 1.0);
    }

    fn is_fullscreen(&self) -> bool {
        self.state.lock().fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), PlayError> {
        self.log.push(Call::RequestFullscreen);
        let mut state = self.state.lock();
        if state.reject_fullscreen {
            return Err(PlayError::Fullscreen {
                reason: "permissions check failed".into(),
            });
        }
        state.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) {
        self.log.push(Call::ExitFullscreen);
        self.state.lock().fullscreen = false;
    }
}

#[derive(Debug, Default)]
struct EngineCounters {
    created: u64,
    live: usize,
    max_live: usize,
    last_config: Option<EngineConfig>,
}

/// Engine capability producing [`FakeEngine`]s.
///
/// Flags are per clone; the created/live counters are shared.
#[derive(Clone, Debug)]
pub struct FakeCapability {
    log: CallLog,
    supported: bool,
    fail_create: bool,
    recover_ok: bool,
    counters: Arc<Mutex<EngineCounters>>,
}

impl FakeCapability {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            supported: true,
            fail_create: false,
            recover_ok: true,
            counters: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_supported(mut self, supported: bool) -> Self {
        self.supported = supported;
        self
    }

    /// Every `create` call fails.
    #[must_use]
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Engines report that media recovery is impossible.
    #[must_use]
    pub fn failing_recovery(mut self) -> Self {
        self.recover_ok = false;
        self
    }

    #[must_use]
    pub fn created(&self) -> u64 {
        self.counters.lock().created
    }

    /// Engines created and not destroyed yet.
    #[must_use]
    pub fn live(&self) -> usize {
        self.counters.lock().live
    }

    /// Highest number of simultaneously live engines seen.
    #[must_use]
    pub fn max_live(&self) -> usize {
        self.counters.lock().max_live
    }

    #[must_use]
    pub fn last_config(&self) -> Option<EngineConfig> {
        self.counters.lock().last_config.clone()
    }
}

impl EngineCapability for FakeCapability {
    type Engine = FakeEngine;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self, config: &EngineConfig) -> Result<FakeEngine, PlayError> {
        if self.fail_create {
            return Err(PlayError::EngineInit {
                reason: "engine constructor threw".into(),
            });
        }
        let id = {
            let mut counters = self.counters.lock();
            counters.created += 1;
            counters.live += 1;
            counters.max_live = counters.max_live.max(counters.live);
            counters.last_config = Some(config.clone());
            counters.created
        };
        self.log.push(Call::EngineCreated(id));
        Ok(FakeEngine {
            id,
            log: self.log.clone(),
            recover_ok: self.recover_ok,
            destroyed: false,
            counters: Arc::clone(&self.counters),
        })
    }
}

/// Recording engine. Every `destroy` call is logged; only the first counts.
#[derive(Debug)]
pub struct FakeEngine {
    id: u64,
    log: CallLog,
    recover_ok: bool,
    destroyed: bool,
    counters: Arc<Mutex<EngineCounters>>,
}

impl FakeEngine {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl StreamEngine for FakeEngine {
    type Surface = FakeSurface;

    fn attach_media(&mut self, _surface: &FakeSurface) {
        self.log.push(Call::AttachMedia(self.id));
    }

    fn load_source(&mut self, url: &str) {
        self.log.push(Call::LoadSource(self.id, url.to_string()));
    }

    fn recover_media_error(&mut self) -> Result<(), PlayError> {
        self.log.push(Call::RecoverMediaError(self.id));
        if self.recover_ok {
            Ok(())
        } else {
            Err(PlayError::RecoveryUnavailable {
                reason: "media element detached".into(),
            })
        }
    }

    fn destroy(&mut self) {
        self.log.push(Call::Destroy(self.id));
        if !self.destroyed {
            self.destroyed = true;
            self.counters.lock().live -= 1;
        }
    }
}
