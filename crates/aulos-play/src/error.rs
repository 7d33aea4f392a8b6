use std::fmt;

/// Taxonomy of playback failures surfaced to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Manifest or segment load failure, timeout, or manifest parse failure.
    Network,
    /// Decode or buffer fault.
    Media,
    /// Neither the engine nor the surface can play the stream.
    Unsupported,
    /// Engine construction failed before any load attempt.
    Init,
    /// Any other engine-reported fault.
    Playback,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "network error",
            Self::Media => "media error",
            Self::Unsupported => "unsupported",
            Self::Init => "initialization error",
            Self::Playback => "playback error",
        };
        f.write_str(name)
    }
}

const COMMON_REMEDIATION: &[&str] = &[
    "Make sure the URL points to a valid .m3u8 playlist",
    "Check that the stream server allows cross-origin (CORS) requests",
    "Check your network connection",
    "Try routing the stream through the proxy server",
];

const MEDIA_REMEDIATION: &[&str] = &[
    "The stream format may not be supported by this player",
    "Try another stream or a different browser",
];

const UNSUPPORTED_REMEDIATION: &[&str] =
    &["Use a modern browser such as Chrome, Firefox or Safari"];

/// A classified playback failure.
///
/// Fatal errors end the session; transient ones are reported while playback
/// continues.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{category}: {detail}")]
pub struct PlaybackError {
    pub category: ErrorCategory,
    pub detail: String,
    pub fatal: bool,
}

impl PlaybackError {
    #[must_use]
    pub fn fatal(category: ErrorCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
            fatal: true,
        }
    }

    #[must_use]
    pub fn transient(category: ErrorCategory, detail: impl Into<String>) -> Self {
        Self {
            category,
            detail: detail.into(),
            fatal: false,
        }
    }

    /// Static guidance shown next to a fatal error.
    #[must_use]
    pub fn remediation(&self) -> &'static [&'static str] {
        match self.category {
            ErrorCategory::Media => MEDIA_REMEDIATION,
            ErrorCategory::Unsupported => UNSUPPORTED_REMEDIATION,
            ErrorCategory::Network | ErrorCategory::Init | ErrorCategory::Playback => {
                COMMON_REMEDIATION
            }
        }
    }
}

/// Failure of a single capability call (surface or engine).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PlayError {
    #[error("engine construction failed: {reason}")]
    EngineInit { reason: String },

    #[error("play request rejected: {reason}")]
    PlayRejected { reason: String },

    #[error("fullscreen request failed: {reason}")]
    Fullscreen { reason: String },

    #[error("media error recovery unavailable: {reason}")]
    RecoveryUnavailable { reason: String },
}
