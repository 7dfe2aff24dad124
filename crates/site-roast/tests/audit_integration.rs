//! End-to-end audits against a local mock HTTP server.

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site_roast::{
    AuditConfig, Auditor, Category, FetchError, Fetcher, Grade, HttpFetcher, JsonReport,
    ReportFormat, ReportOptions, RoastError,
};

// ─────────────────────── helpers ───────────────────────

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("Strict-Transport-Security", "max-age=63072000"),
    ("Content-Security-Policy", "default-src 'self'"),
    ("X-Frame-Options", "DENY"),
    ("X-Content-Type-Options", "nosniff"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
];

/// A page that scores full marks everywhere except transport security.
fn good_page() -> String {
    let description = "Rocket kits for builders. ".repeat(6);
    let ld = |t: &str| {
        format!(r#"<script type="application/ld+json">{{"@context":"https://schema.org","@type":"{t}"}}</script>"#)
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>Acme Rocket Supplies: Fast Shipping for Model Builders!</title>
  <meta name="description" content="{description}">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta property="og:title" content="Acme Rocket Supplies">
  <meta property="og:description" content="Model rocket kits">
  <meta property="og:image" content="https://acme.example/og.png">
  <meta property="og:url" content="https://acme.example/">
  <meta property="og:type" content="website">
  <meta name="twitter:card" content="summary_large_image">
  <link rel="stylesheet" href="/site.css">
  <script src="/app.js" defer></script>
  {org}{site}{crumbs}
</head>
<body>
  <h1>Acme Rockets</h1>
  <h2>Kits</h2>
  <img src="/img/rocket.webp" alt="A red model rocket on its pad">
  <a href="/kits">Kits</a>
  <a href="/engines">Engines</a>
  <a href="about.html">About</a>
  <a href="https://github.com/acme" rel="noopener noreferrer">GitHub</a>
</body>
</html>"#,
        org = ld("Organization"),
        site = ld("WebSite"),
        crumbs = ld("BreadcrumbList"),
    )
}

fn html_response(body: &str) -> ResponseTemplate {
    let mut template = ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html");
    for (name, value) in SECURITY_HEADERS {
        template = template.insert_header(name, value);
    }
    template
}

async fn serve(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(body))
        .mount(&server)
        .await;
    server
}

fn config(timeout_secs: u64) -> AuditConfig {
    AuditConfig {
        timeout_secs,
        ..AuditConfig::default()
    }
}

// ─────────────────────── orchestrator ───────────────────────

#[tokio::test]
async fn test_full_audit_of_well_built_page() {
    let server = serve(&good_page()).await;
    let url = format!("{}/", server.uri());

    let audit = Auditor::new(config(10)).audit(&url).await.unwrap();

    assert_eq!(audit.url(), url);
    for category in Category::ALL {
        let expected = if category == Category::SslSecurity { 50 } else { 100 };
        assert_eq!(
            audit.result(category).score(),
            expected,
            "{category}: {:?}",
            audit.result(category).findings()
        );
    }
    // nine perfect categories and plain-http transport
    assert_eq!(audit.overall_score(), 95);
    assert_eq!(audit.grade(), Grade::A);
}

#[tokio::test]
async fn test_bare_page_still_yields_ten_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("", "text/html"))
        .mount(&server)
        .await;

    let audit = Auditor::new(config(10))
        .audit(&format!("{}/", server.uri()))
        .await
        .unwrap();

    let scores: Vec<u8> = audit.results().iter().map(|(_, r)| r.score()).collect();
    assert_eq!(scores.len(), 10);
    assert_eq!(audit.result(Category::Title).score(), 0);
    assert_eq!(audit.result(Category::MetaDescription).score(), 0);
    assert_eq!(audit.result(Category::Images).score(), 70);
    assert_eq!(audit.result(Category::Links).score(), 30);
    assert_eq!(audit.result(Category::Schema).score(), 0);
    assert_eq!(audit.grade(), Grade::F);
}

#[tokio::test]
async fn test_repeat_audits_differ_only_in_timing() {
    let server = serve(&good_page()).await;
    let url = format!("{}/", server.uri());
    let auditor = Auditor::new(config(10));

    let first = auditor.audit(&url).await.unwrap();
    let second = auditor.audit(&url).await.unwrap();

    assert_eq!(first.results(), second.results());
    assert_eq!(first.overall_score(), second.overall_score());
}

#[tokio::test]
async fn test_json_report_round_trips() {
    let server = serve(&good_page()).await;
    let audit = Auditor::new(config(10))
        .audit(&format!("{}/", server.uri()))
        .await
        .unwrap();

    let options = ReportOptions {
        serious: true,
        verbose: false,
        color: false,
    };
    let json = site_roast::render(&audit, ReportFormat::Json, options).unwrap();
    let restored = JsonReport::parse(&json).unwrap().into_audit().unwrap();

    assert_eq!(restored, audit);
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "roast-test/0.1"))
        .respond_with(html_response("<title>ok</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = AuditConfig {
        timeout_secs: 10,
        user_agent: "roast-test/0.1".to_string(),
    };
    let audit = Auditor::new(config)
        .audit(&format!("{}/", server.uri()))
        .await
        .unwrap();
    assert_eq!(audit.result(Category::Title).score(), 50);
}

// ─────────────────────── fetch errors ───────────────────────

#[tokio::test]
async fn test_error_status_aborts_audit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = Auditor::new(config(10))
        .audit(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, RoastError::Fetch(FetchError::HttpStatus { status: 404, .. })),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response("<title>late</title>").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = HttpFetcher::new()
        .fetch(&format!("{}/", server.uri()), &config(1))
        .await
        .unwrap_err();

    assert!(
        matches!(err, FetchError::Timeout { timeout_secs: 1, .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_refused_connection() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = HttpFetcher::new()
        .fetch(&format!("http://127.0.0.1:{port}/"), &config(5))
        .await
        .unwrap_err();

    assert!(
        matches!(err, FetchError::Connection { .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_refused_connection_ignores_tls_words_in_url() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    for path in ["ssl-guide", "tls/handshake", "certificate.html"] {
        let err = HttpFetcher::new()
            .fetch(&format!("http://127.0.0.1:{port}/{path}"), &config(5))
            .await
            .unwrap_err();

        assert!(
            matches!(err, FetchError::Connection { .. }),
            "{path}: unexpected error: {err}"
        );
    }
}

#[tokio::test]
async fn test_https_against_plain_http_server_is_tls_failure() {
    let server = serve("<title>plain</title>").await;
    let https_url = server.uri().replacen("http://", "https://", 1);

    let err = HttpFetcher::new()
        .fetch(&format!("{https_url}/"), &config(5))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Tls { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response("<title>moved</title>"))
        .mount(&server)
        .await;

    let requested = format!("{}/old", server.uri());
    let page = HttpFetcher::new().fetch(&requested, &config(10)).await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.requested_url, requested);
    assert_eq!(page.final_url, format!("{}/", server.uri()));
    assert!(page.headers.contains("x-frame-options"));
    assert_eq!(page.text(), "<title>moved</title>");
}
