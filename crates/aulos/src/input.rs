//! Stream URL input validation.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("enter a URL")]
    Empty,

    #[error("enter a valid URL: {reason}")]
    Invalid { input: String, reason: String },
}

/// Accepts any absolute URL, surrounding whitespace trimmed.
///
/// The extension is not checked: manifests are often served from paths
/// without `.m3u8`.
pub fn validate(input: &str) -> Result<Url, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    Url::parse(trimmed).map_err(|e| InputError::Invalid {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://cdn.example/live/index.m3u8")]
    #[case("  https://cdn.example/stream?id=7  ")]
    #[case("http://localhost:3001/proxy/videos/a.m3u8")]
    fn accepts_absolute_urls(#[case] input: &str) {
        assert!(validate(input).is_ok());
    }

    #[rstest]
    #[case("", InputError::Empty)]
    #[case("   ", InputError::Empty)]
    fn rejects_blank(#[case] input: &str, #[case] expected: InputError) {
        assert_eq!(validate(input), Err(expected));
    }

    #[rstest]
    #[case("cdn.example/live.m3u8")]
    #[case("/relative/index.m3u8")]
    #[case("http://")]
    fn rejects_non_urls(#[case] input: &str) {
        assert!(matches!(validate(input), Err(InputError::Invalid { .. })));
    }
}
