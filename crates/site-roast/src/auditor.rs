//! Audit orchestrator: fetch once, parse once, run every analyzer.

use std::time::Instant;

use chrono::{DateTime, Utc};
use url::Url;

use crate::analyzers::{self, PageContext};
use crate::config::AuditConfig;
use crate::document::Document;
use crate::fetch::{FetchedPage, Fetcher, HttpFetcher};
use crate::types::{RoastError, RoastResult, WebsiteAudit};

/// Runs complete audits. Holds no per-audit state, so one auditor can serve
/// any number of concurrent [`Auditor::audit`] calls.
pub struct Auditor<F: Fetcher = HttpFetcher> {
    fetcher: F,
    config: AuditConfig,
}

impl Auditor<HttpFetcher> {
    /// Auditor backed by the real HTTP fetcher.
    pub fn new(config: AuditConfig) -> Self {
        Self::with_fetcher(HttpFetcher::new(), config)
    }
}

impl Default for Auditor<HttpFetcher> {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

impl<F: Fetcher> Auditor<F> {
    pub fn with_fetcher(fetcher: F, config: AuditConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit a single absolute URL.
    ///
    /// Only a fetch failure (or an unparsable URL) is an error. Once the page
    /// is in hand, all ten categories are always scored.
    pub async fn audit(&self, url: &str) -> RoastResult<WebsiteAudit> {
        let parsed = Url::parse(url).map_err(|e| RoastError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let start = Instant::now();
        let fetched_at = Utc::now();
        tracing::info!("Auditing {url}");

        let page = match self.fetcher.fetch(url, &self.config).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Fetch failed: {e}");
                return Err(e.into());
            }
        };

        Ok(audit_page(&parsed, &page, fetched_at, start))
    }
}

/// Analyze an already fetched page.
///
/// The parsed document is not `Send`, so parsing and analysis happen here,
/// outside any `.await`.
pub fn audit_page(
    url: &Url,
    page: &FetchedPage,
    fetched_at: DateTime<Utc>,
    start: Instant,
) -> WebsiteAudit {
    let document = Document::parse(&page.body);
    let warnings = document.parse_warnings();
    if warnings > 0 {
        tracing::debug!("Recovered from {warnings} markup errors");
    }

    let ctx = PageContext {
        url,
        document: &document,
        page,
    };
    let results = analyzers::run_all(&ctx);

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let audit = WebsiteAudit::new(url.as_str(), fetched_at, duration_ms, results);
    tracing::info!(
        "Audited {} in {duration_ms}ms: {}/100 ({})",
        audit.url(),
        audit.overall_score(),
        audit.grade()
    );
    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, ResponseHeaders};
    use crate::types::Category;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        html: String,
        headers: Vec<(String, String)>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(html: &str) -> Self {
            Self {
                html: html.to_string(),
                headers: Vec::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, url: &str, _config: &AuditConfig) -> Result<FetchedPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FetchedPage::new(
                url,
                200,
                ResponseHeaders::from_pairs(self.headers.iter().map(|(k, v)| (k, v))),
                self.html.as_bytes().to_vec(),
            ))
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl Fetcher for FailingFetcher {
        async fn fetch(&self, url: &str, config: &AuditConfig) -> Result<FetchedPage, FetchError> {
            Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_secs: config.timeout_secs,
            })
        }
    }

    const PAGE: &str = r#"<!DOCTYPE html><html><head>
        <title>Acme Rocket Supplies: Fast Shipping for Model Builders!</title>
        <meta name="viewport" content="width=device-width, initial-scale=1">
        </head><body><h1>Rockets</h1><a href="/a">a</a><a href="/b">b</a><a href="/c">c</a></body></html>"#;

    #[test]
    fn test_audit_scores_all_categories() {
        let auditor = Auditor::with_fetcher(StaticFetcher::new(PAGE), AuditConfig::default());
        let audit = tokio_test::block_on(auditor.audit("https://example.com/")).unwrap();

        assert_eq!(audit.url(), "https://example.com/");
        assert_eq!(audit.results().iter().count(), 10);
        assert_eq!(audit.result(Category::Title).score(), 100);
        assert_eq!(audit.result(Category::Headings).score(), 100);
        assert_eq!(audit.result(Category::Links).score(), 100);
        assert_eq!(audit.result(Category::Images).score(), 70);
        assert_eq!(auditor.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fetch_error_aborts_audit() {
        let auditor = Auditor::with_fetcher(FailingFetcher, AuditConfig::default());
        let err = tokio_test::block_on(auditor.audit("https://example.com/")).unwrap_err();
        assert!(matches!(
            err,
            RoastError::Fetch(FetchError::Timeout { timeout_secs: 30, .. })
        ));
    }

    #[test]
    fn test_invalid_url_is_rejected_before_fetching() {
        let auditor = Auditor::with_fetcher(StaticFetcher::new(PAGE), AuditConfig::default());
        let err = tokio_test::block_on(auditor.audit("not a url")).unwrap_err();
        assert!(matches!(err, RoastError::InvalidUrl { .. }));
        assert_eq!(auditor.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_body_still_yields_ten_results() {
        let auditor = Auditor::with_fetcher(StaticFetcher::new(""), AuditConfig::default());
        let audit = tokio_test::block_on(auditor.audit("http://example.com/")).unwrap();
        assert_eq!(audit.results().scores().len(), 10);
        assert_eq!(audit.result(Category::Title).score(), 0);
        assert!(audit.overall_score() <= 100);
    }

    #[test]
    fn test_repeat_audits_are_identical_apart_from_timing() {
        let mut fetcher = StaticFetcher::new(PAGE);
        fetcher.headers = vec![("X-Frame-Options".into(), "DENY".into())];
        let auditor = Auditor::with_fetcher(fetcher, AuditConfig::default());
        let first = tokio_test::block_on(auditor.audit("https://example.com/")).unwrap();
        let second = tokio_test::block_on(auditor.audit("https://example.com/")).unwrap();
        assert_eq!(first.results(), second.results());
    }
}
