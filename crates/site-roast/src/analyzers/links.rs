//! Anchor analyzer: link count, internal/external split and `rel` hygiene.

use url::Url;

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

const NO_LINKS_SCORE: i32 = 30;
const MIN_LINKS: usize = 3;
const FEW_LINKS_PENALTY: i32 = 30;
const MISSING_NOOPENER_PENALTY: i32 = 10;

/// Href prefixes that are neither internal nor external.
const NON_NAVIGATING: [&str; 4] = ["#", "javascript:", "mailto:", "tel:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Internal,
    External,
    /// Fragment, script, mail or phone link.
    Other,
}

pub struct LinksAnalyzer;

impl Analyzer for LinksAnalyzer {
    fn category(&self) -> Category {
        Category::Links
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let links = ctx.document.select("a[href]");
        let total = links.len();

        if total == 0 {
            let mut card = ScoreCard::new(NO_LINKS_SCORE);
            card.finding("Found 0 link(s)");
            card.finding("No links found on page");
            card.recommend("Add navigation links to help users explore your site");
            card.raw("total", 0);
            return card.finish();
        }

        let mut internal = 0usize;
        let mut external = 0usize;
        let mut nofollow = 0usize;
        let mut external_without_noopener = 0usize;

        for link in &links {
            let href = link.attr("href").unwrap_or("");
            let rel = link.rel_tokens();
            match classify(href, ctx.url) {
                LinkKind::Internal => internal += 1,
                LinkKind::External => {
                    external += 1;
                    if !rel.iter().any(|t| t == "noopener") {
                        external_without_noopener += 1;
                    }
                }
                LinkKind::Other => {}
            }
            if rel.iter().any(|t| t == "nofollow") {
                nofollow += 1;
            }
        }

        let mut card = ScoreCard::new(100);
        card.finding(format!("Found {total} link(s)"));
        card.finding(format!("Internal links: {internal}"));
        card.finding(format!("External links: {external}"));

        if total < MIN_LINKS {
            card.penalize(FEW_LINKS_PENALTY);
            card.finding("Very few links on page");
            card.recommend("Add more navigation links to improve site structure");
        }

        if external_without_noopener > 0 {
            card.penalize(MISSING_NOOPENER_PENALTY);
            card.finding(format!(
                "{external_without_noopener} external links missing rel='noopener noreferrer'"
            ));
            card.recommend("Add rel='noopener noreferrer' to external links for security");
        }

        card.raw("total", total);
        card.raw("internal", internal);
        card.raw("external", external);
        card.raw("nofollow", nofollow);
        card.raw("external_without_noopener", external_without_noopener);
        card.finish()
    }
}

fn classify(href: &str, base: &Url) -> LinkKind {
    let href = href.trim();
    let lowered = href.to_ascii_lowercase();

    let absolute = lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with("//");
    if absolute {
        return match base.join(href) {
            Ok(target) if same_authority(&target, base) => LinkKind::Internal,
            _ => LinkKind::External,
        };
    }

    if NON_NAVIGATING.iter().any(|p| lowered.starts_with(p)) {
        LinkKind::Other
    } else {
        LinkKind::Internal
    }
}

fn same_authority(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
