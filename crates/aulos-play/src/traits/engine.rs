use std::fmt;

use aulos_platform::MaybeSend;

use crate::{error::PlayError, impls::config::EngineConfig, traits::surface::RenderSurface};

/// Probe and factory for the adaptive-streaming engine.
pub trait EngineCapability: MaybeSend + 'static {
    type Engine: StreamEngine;

    /// Whether the engine can run on this platform.
    fn is_supported(&self) -> bool;

    fn create(&self, config: &EngineConfig) -> Result<Self::Engine, PlayError>;
}

/// One adaptive-streaming engine instance.
///
/// Results of `load_source` arrive later as [`EngineEvent`]s.
#[cfg_attr(
    test,
    unimock::unimock(api = StreamEngineMock, type Surface = unimock::Unimock;)
)]
pub trait StreamEngine: MaybeSend + 'static {
    type Surface: RenderSurface;

    fn attach_media(&mut self, surface: &Self::Surface);

    fn load_source(&mut self, url: &str);

    /// Ask the engine to recover from a media fault.
    fn recover_media_error(&mut self) -> Result<(), PlayError>;

    fn destroy(&mut self);
}

/// Events raised by a streaming engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineEvent {
    ManifestParsed,
    /// A fragment was appended to the media buffer.
    FragmentBuffered,
    Fault(EngineFault),
}

/// Engine-reported fault type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FaultKind {
    Network,
    Media,
    Mux,
    Key,
    Other,
}

/// Engine-reported fault detail.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FaultDetail {
    ManifestLoadError,
    ManifestLoadTimeout,
    ManifestParsingError,
    LevelLoadError,
    LevelLoadTimeout,
    FragLoadError,
    FragLoadTimeout,
    FragParsingError,
    BufferAppendError,
    BufferStalledError,
    BufferFullError,
    Other(String),
}

impl FaultDetail {
    /// Manifest-stage faults are network faults whatever type the engine reports.
    #[must_use]
    pub fn is_manifest(&self) -> bool {
        matches!(
            self,
            Self::ManifestLoadError | Self::ManifestLoadTimeout | Self::ManifestParsingError
        )
    }

    #[must_use]
    pub fn is_buffer(&self) -> bool {
        matches!(
            self,
            Self::BufferAppendError | Self::BufferStalledError | Self::BufferFullError
        )
    }
}

impl fmt::Display for FaultDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ManifestLoadError => "manifestLoadError",
            Self::ManifestLoadTimeout => "manifestLoadTimeOut",
            Self::ManifestParsingError => "manifestParsingError",
            Self::LevelLoadError => "levelLoadError",
            Self::LevelLoadTimeout => "levelLoadTimeOut",
            Self::FragLoadError => "fragLoadError",
            Self::FragLoadTimeout => "fragLoadTimeOut",
            Self::FragParsingError => "fragParsingError",
            Self::BufferAppendError => "bufferAppendError",
            Self::BufferStalledError => "bufferStalledError",
            Self::BufferFullError => "bufferFullError",
            Self::Other(other) => other.as_str(),
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineFault {
    pub kind: FaultKind,
    pub detail: FaultDetail,
    pub fatal: bool,
    pub response_code: Option<u16>,
}

impl EngineFault {
    #[must_use]
    pub fn fatal(kind: FaultKind, detail: FaultDetail) -> Self {
        Self {
            kind,
            detail,
            fatal: true,
            response_code: None,
        }
    }

    #[must_use]
    pub fn non_fatal(kind: FaultKind, detail: FaultDetail) -> Self {
        Self {
            fatal: false,
            ..Self::fatal(kind, detail)
        }
    }

    #[must_use]
    pub fn with_response_code(mut self, code: u16) -> Self {
        self.response_code = Some(code);
        self
    }
}

impl From<EngineFault> for EngineEvent {
    fn from(fault: EngineFault) -> Self {
        Self::Fault(fault)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FaultDetail::ManifestLoadError, true, false)]
    #[case(FaultDetail::ManifestParsingError, true, false)]
    #[case(FaultDetail::BufferStalledError, false, true)]
    #[case(FaultDetail::FragLoadError, false, false)]
    fn detail_families(#[case] detail: FaultDetail, #[case] manifest: bool, #[case] buffer: bool) {
        assert_eq!(detail.is_manifest(), manifest);
        assert_eq!(detail.is_buffer(), buffer);
    }

    #[test]
    fn other_detail_displays_verbatim() {
        assert_eq!(
            FaultDetail::Other("keyLoadError".into()).to_string(),
            "keyLoadError"
        );
    }

    #[test]
    fn non_fatal_keeps_kind_and_detail() {
        let fault = EngineFault::non_fatal(FaultKind::Network, FaultDetail::FragLoadTimeout)
            .with_response_code(504);
        assert!(!fault.fatal);
        assert_eq!(fault.kind, FaultKind::Network);
        assert_eq!(fault.response_code, Some(504));
    }
}
