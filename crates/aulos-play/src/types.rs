use std::fmt;

/// MIME type probed on the surface for native adaptive-stream playback.
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// Identifier of one playback session. Monotonic per controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Manifest-based stream played through the adaptive engine.
    #[default]
    AdaptiveStream,
    /// Single-file resource the surface plays directly.
    ProgressiveFile,
}

/// One submitted URL. A new request always supersedes the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackRequest {
    url: String,
    kind: MediaKind,
}

impl PlaybackRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    /// Build a request, inferring the media kind from the URL path.
    ///
    /// Only a known progressive extension (`.mp4`, `.webm`, ...) makes a
    /// progressive file. Everything else, extensionless manifest endpoints
    /// included, is treated as an adaptive stream.
    ///
    /// Never rejects input: unusable strings fail later, at load time.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        let kind = match extension(url).as_deref().and_then(progressive_mime) {
            Some(_) => MediaKind::ProgressiveFile,
            None => MediaKind::AdaptiveStream,
        };
        Self::new(url, kind)
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Whether the URL is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }

    /// MIME type the render surface is probed with for native playback.
    #[must_use]
    pub fn native_mime(&self) -> &'static str {
        match self.kind {
            MediaKind::AdaptiveStream => HLS_MIME_TYPE,
            MediaKind::ProgressiveFile => extension(&self.url)
                .as_deref()
                .and_then(progressive_mime)
                .unwrap_or("video/mp4"),
        }
    }
}

fn progressive_mime(ext: &str) -> Option<&'static str> {
    Some(match ext {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" | "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "aac" => "audio/aac",
        "wav" => "audio/wav",
        _ => return None,
    })
}

/// Lowercased extension of the last path segment, ignoring query and fragment.
fn extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Playback path chosen for a session. Immutable once selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathKind {
    EngineAttached,
    NativeAttached,
    Unsupported,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    Idle,
    Initializing,
    Buffering,
    Playing,
    Paused,
    ErrorTransient,
    ErrorFatal,
}

/// Answer of a surface's media type probe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CanPlayType {
    #[default]
    Empty,
    Maybe,
    Probably,
}

impl CanPlayType {
    #[must_use]
    pub fn is_playable(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Transient, user-facing message that is not a playback error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://example.com/live/master.m3u8", MediaKind::AdaptiveStream)]
    #[case("https://example.com/live/INDEX.M3U8?token=abc", MediaKind::AdaptiveStream)]
    #[case("https://example.com/list.m3u#start", MediaKind::AdaptiveStream)]
    #[case("https://example.com/movie.mp4", MediaKind::ProgressiveFile)]
    #[case("https://example.com/movie.M4V?dl=1", MediaKind::ProgressiveFile)]
    #[case("https://example.com/live/stream", MediaKind::AdaptiveStream)]
    #[case("https://example.com/live/playlist?format=hls", MediaKind::AdaptiveStream)]
    #[case("https://example.com/manifest.php", MediaKind::AdaptiveStream)]
    #[case("not a url at all", MediaKind::AdaptiveStream)]
    #[case("", MediaKind::AdaptiveStream)]
    fn detect_media_kind(#[case] url: &str, #[case] expected: MediaKind) {
        assert_eq!(PlaybackRequest::detect(url).kind(), expected);
    }

    #[rstest]
    #[case("https://example.com/a.m3u8", HLS_MIME_TYPE)]
    #[case("https://example.com/a.webm", "video/webm")]
    #[case("https://example.com/a.OGV", "video/ogg")]
    #[case("https://example.com/a.mp3?x=1", "audio/mpeg")]
    #[case("https://example.com/a.m4v", "video/mp4")]
    #[case("https://example.com/live/stream", HLS_MIME_TYPE)]
    fn native_mime_from_extension(#[case] url: &str, #[case] mime: &str) {
        assert_eq!(PlaybackRequest::detect(url).native_mime(), mime);
    }

    #[rstest]
    #[case("", true)]
    #[case("   \t\n", true)]
    #[case(" https://example.com/a.m3u8 ", false)]
    fn blank_requests(#[case] url: &str, #[case] blank: bool) {
        assert_eq!(PlaybackRequest::detect(url).is_blank(), blank);
    }

    #[test]
    fn dotfile_segment_has_no_extension() {
        assert_eq!(extension("https://example.com/.m3u8"), None);
    }

    #[rstest]
    #[case(CanPlayType::Empty, false)]
    #[case(CanPlayType::Maybe, true)]
    #[case(CanPlayType::Probably, true)]
    fn can_play_type_playable(#[case] answer: CanPlayType, #[case] playable: bool) {
        assert_eq!(answer.is_playable(), playable);
    }
}
