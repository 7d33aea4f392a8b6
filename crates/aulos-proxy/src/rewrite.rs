use url::Url;

/// Proxy base used when none is configured.
pub const DEFAULT_PROXY_BASE: &str = "http://localhost:3001/proxy";

/// Rewrites stream URLs onto a proxy base.
///
/// `https://host/live/index.m3u8?token=1` becomes
/// `{base}/live/index.m3u8?token=1`. The stream host is dropped: the proxy
/// forwards to its own configured upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyRewrite {
    base: String,
}

impl Default for ProxyRewrite {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_BASE)
    }
}

impl ProxyRewrite {
    /// Trailing slashes on `base` are ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether `url` already goes through this proxy. The scheme is not compared.
    #[must_use]
    pub fn is_proxied(&self, url: &str) -> bool {
        let marker = self
            .base
            .split_once("://")
            .map_or(self.base.as_str(), |(_, rest)| rest);
        url.contains(marker)
    }

    /// Route `url` through the proxy, leaving already proxied URLs alone.
    #[must_use]
    pub fn rewrite(&self, url: &Url) -> String {
        if self.is_proxied(url.as_str()) {
            return url.to_string();
        }
        match url.query() {
            Some(query) => format!("{}{}?{query}", self.base, url.path()),
            None => format!("{}{}", self.base, url.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        "https://s3-store.flyooo.uk/videos/a/index.m3u8",
        "http://localhost:3001/proxy/videos/a/index.m3u8"
    )]
    #[case(
        "https://cdn.example/live.m3u8?token=abc&t=1",
        "http://localhost:3001/proxy/live.m3u8?token=abc&t=1"
    )]
    #[case("https://cdn.example", "http://localhost:3001/proxy/")]
    #[case(
        "http://localhost:3001/proxy/videos/a/index.m3u8",
        "http://localhost:3001/proxy/videos/a/index.m3u8"
    )]
    #[case(
        "https://localhost:3001/proxy/already.m3u8",
        "https://localhost:3001/proxy/already.m3u8"
    )]
    fn rewrite_with_default_base(#[case] input: &str, #[case] expected: &str) {
        let url = Url::parse(input).unwrap();
        assert_eq!(ProxyRewrite::default().rewrite(&url), expected);
    }

    #[test]
    fn custom_base_ignores_trailing_slash() {
        let rewrite = ProxyRewrite::new("https://proxy.example/relay/");
        assert_eq!(rewrite.base(), "https://proxy.example/relay");
        let url = Url::parse("https://cdn.example/a/b.ts").unwrap();
        assert_eq!(rewrite.rewrite(&url), "https://proxy.example/relay/a/b.ts");
        assert!(rewrite.is_proxied("http://proxy.example/relay/a/b.ts"));
        assert!(!ProxyRewrite::default().is_proxied("https://cdn.example/a/b.ts"));
    }
}
