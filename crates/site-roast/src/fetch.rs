//! Page fetcher wrapping reqwest.
//!
//! One GET per audit: redirects are followed (up to five hops), nothing is
//! retried, and failures are classified so callers can tell a timeout from a
//! refused connection, a bad certificate or an error status.

use std::collections::BTreeMap;
use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::AuditConfig;

/// Why a page could not be fetched. Aborts the whole audit.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Could not connect to {url}: {message}")]
    Connection { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("TLS failure for {url}: {message}")]
    Tls { url: String, message: String },
}

/// Response headers with case-insensitive lookup.
///
/// Keys are stored lowercase; repeated headers are joined with `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders(BTreeMap<String, String>);

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs in any case.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut headers = Self::new();
        for (k, v) in pairs {
            headers.insert(k.as_ref(), v.as_ref());
        }
        headers
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.0
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL that was requested.
    pub requested_url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code (always 2xx for pages returned by a [`Fetcher`]).
    pub status: u16,
    /// All response headers.
    pub headers: ResponseHeaders,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// A page that was served from `url` without redirects.
    pub fn new(url: impl Into<String>, status: u16, headers: ResponseHeaders, body: Vec<u8>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            requested_url: url,
            status,
            headers,
            body,
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn size_bytes(&self) -> usize {
        self.body.len()
    }
}

/// Something that can retrieve a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` honouring the configured timeout and user agent.
    async fn fetch(&self, url: &str, config: &AuditConfig) -> Result<FetchedPage, FetchError>;
}

const MAX_REDIRECTS: usize = 5;

/// Lowercase fragments that only appear in TLS-layer failures.
const TLS_MARKERS: [&str; 7] = [
    "certificate",
    "tls",
    "ssl",
    "handshake",
    "corrupt message",
    "invalidcontenttype",
    "alert",
];

/// HTTP fetcher backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = match reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    "Failed to build HTTP client ({e}); falling back to defaults without the {MAX_REDIRECTS}-redirect limit"
                );
                reqwest::Client::new()
            }
        };
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, config: &AuditConfig) -> Result<FetchedPage, FetchError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .header(reqwest::header::USER_AGENT, config.user_agent.as_str())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .send()
            .await
            .map_err(|e| classify(&e, url, config.timeout_secs))?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        if !status.is_success() {
            tracing::warn!("{url} answered with HTTP {}", status.as_u16());
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut headers = ResponseHeaders::new();
        for (k, v) in resp.headers() {
            headers.insert(k.as_str(), v.to_str().unwrap_or(""));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| classify(&e, url, config.timeout_secs))?
            .to_vec();

        tracing::debug!(
            "fetched {url} ({} bytes, {} headers, final url {final_url})",
            body.len(),
            headers.len()
        );

        Ok(FetchedPage {
            requested_url: url.to_string(),
            final_url,
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Map a transport error onto the fetch error taxonomy.
///
/// Only the error's sources are inspected: reqwest's own message embeds the
/// request URL, which must not influence the kind.
fn classify(err: &reqwest::Error, url: &str, timeout_secs: u64) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
            timeout_secs,
        };
    }

    let causes = err.source().map(error_chain).unwrap_or_default();
    let message = error_chain(err);
    if is_tls_failure(url, err.is_connect(), &causes) {
        FetchError::Tls {
            url: url.to_string(),
            message,
        }
    } else {
        FetchError::Connection {
            url: url.to_string(),
            message,
        }
    }
}

/// Decide whether a transport failure happened in the TLS layer.
///
/// An `https` connect failure that got past DNS and TCP can only have failed
/// during the handshake.
fn is_tls_failure(url: &str, is_connect: bool, causes: &str) -> bool {
    let lowered = causes.to_lowercase();
    if TLS_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return true;
    }
    let https = Url::parse(url).is_ok_and(|u| u.scheme() == "https");
    https && is_connect && !lowered.contains("tcp connect") && !lowered.contains("dns error")
}

/// Render an error and all of its sources as `outer: inner: ...`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
