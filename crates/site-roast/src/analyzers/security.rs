//! HTTPS and security response header analyzer.
//!
//! Only presence of each header is checked; values are not validated.

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

/// Headers checked, with the reason each one matters.
const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("Strict-Transport-Security", "HSTS - forces HTTPS connections"),
    ("Content-Security-Policy", "CSP - prevents XSS attacks"),
    ("X-Frame-Options", "Prevents clickjacking"),
    ("X-Content-Type-Options", "Prevents MIME sniffing"),
    ("Referrer-Policy", "Controls referrer information leakage"),
];

const NO_HTTPS_PENALTY: i32 = 50;
const PER_MISSING_HEADER: i32 = 6;
const MAX_HEADER_PENALTY: i32 = 30;
const MAX_HEADER_RECOMMENDATIONS: usize = 3;

pub struct SecurityAnalyzer;

impl Analyzer for SecurityAnalyzer {
    fn category(&self) -> Category {
        Category::SslSecurity
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let mut card = ScoreCard::new(100);

        let https = ctx.url.scheme() == "https";
        if https {
            card.finding("HTTPS is enabled ✓");
        } else {
            card.penalize(NO_HTTPS_PENALTY);
            card.finding("Site is not using HTTPS");
            card.recommend("Enable HTTPS - it's free with Let's Encrypt and essential for security");
        }

        let (found, missing): (Vec<_>, Vec<_>) = SECURITY_HEADERS
            .iter()
            .partition(|(name, _)| ctx.page.headers.contains(name));

        card.finding(format!(
            "Security headers found: {}/{}",
            found.len(),
            SECURITY_HEADERS.len()
        ));

        if !missing.is_empty() {
            let penalty = (missing.len() as i32 * PER_MISSING_HEADER).min(MAX_HEADER_PENALTY);
            card.penalize(penalty);
            for (name, why) in missing.iter().take(MAX_HEADER_RECOMMENDATIONS) {
                card.recommend(format!("Add {name} header: {why}"));
            }
        }

        card.raw("https", https);
        card.raw(
            "found_headers",
            found.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        );
        card.raw(
            "missing_headers",
            missing.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        );
        card.finish()
    }
}
