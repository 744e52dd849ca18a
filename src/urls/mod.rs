//! URL helpers
//!
//! Canonicalization and host extraction used by the frontier (dedupe keys),
//! the host-policy cache (per-host keys), and the parser (internal/external
//! link classification).

use url::Url;

/// Canonicalizes a URL for use as a document identity and dedupe key
///
/// The fragment is stripped: `/page` and `/page#section` are the same
/// resource to the crawler. Everything else is kept as parsed.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use dream_crawler::urls::canonicalize;
///
/// let url = Url::parse("https://example.com/page#section").unwrap();
/// assert_eq!(canonicalize(&url), "https://example.com/page");
/// ```
pub fn canonicalize(url: &Url) -> String {
    if url.fragment().is_none() {
        return url.to_string();
    }
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped.to_string()
}

/// Returns the host key for a URL: lowercase host plus explicit port
///
/// The port is included only when it appears in the URL, so
/// `https://example.com/` and `https://example.com:8443/` key different
/// hosts. Rate limits, robots records, and the whitelist all use this key.
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
