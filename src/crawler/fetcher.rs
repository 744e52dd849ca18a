//! HTTP fetching over the shared client

use crate::config::USER_AGENT;
use crate::{CrawlerError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const ACCEPT_HEADER: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Raw result of fetching one URL
#[derive(Debug)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// First value per response header key (lowercase names)
    pub headers: BTreeMap<String, String>,
    /// Content-Type header value, empty when absent
    pub content_type: String,
    /// Declared Content-Length; -1 when the server did not report one
    pub declared_size: i64,
    /// Response body; empty for non-success statuses
    pub body: String,
}

/// Outcome of a fetch attempt that did not fail
#[derive(Debug)]
pub enum FetchOutcome {
    Page(FetchedPage),
    /// The cancellation signal fired before the response completed
    Cancelled,
}

/// Builds the single shared HTTP client
///
/// Connection pooling (10 idle connections per host, 90s idle timeout) and
/// the crawler's User-Agent and Accept headers are fixed; only the request
/// timeout is configurable.
pub fn build_http_client(request_timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(request_timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(10)
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Fetches a URL
///
/// Non-success statuses are not errors: the page comes back with the
/// reported status and an empty body so a status-only document can still be
/// published. Transport failures (DNS, connect, TLS, timeout, read) map to
/// `CrawlerError::Http`. The in-flight request is dropped promptly when the
/// cancellation signal fires.
pub async fn fetch(
    client: &Client,
    cancel: &CancellationToken,
    url: &str,
) -> Result<FetchOutcome> {
    let response = tokio::select! {
        _ = cancel.cancelled() => return Ok(FetchOutcome::Cancelled),
        result = client.get(url).send() => result.map_err(|source| CrawlerError::Http {
            url: url.to_string(),
            source,
        })?,
    };

    let status = response.status();
    let mut headers = BTreeMap::new();
    for (name, value) in response.headers() {
        if let Ok(value) = value.to_str() {
            headers
                .entry(name.as_str().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    let content_type = headers.get("content-type").cloned().unwrap_or_default();
    let declared_size = response.content_length().map(|n| n as i64).unwrap_or(-1);

    let body = if status.is_success() {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(FetchOutcome::Cancelled),
            result = response.text() => result.map_err(|source| CrawlerError::Http {
                url: url.to_string(),
                source,
            })?,
        }
    } else {
        String::new()
    };

    Ok(FetchOutcome::Page(FetchedPage {
        status: status.as_u16(),
        headers,
        content_type,
        declared_size,
        body,
    }))
}
