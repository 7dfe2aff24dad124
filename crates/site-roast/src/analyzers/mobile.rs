//! Mobile-friendliness analyzer: viewport tag and oversized fixed widths.

use std::sync::OnceLock;

use regex::Regex;

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

const MISSING_VIEWPORT_PENALTY: i32 = 40;
const NO_DEVICE_WIDTH_PENALTY: i32 = 20;
const FIXED_WIDTH_PENALTY: i32 = 15;

/// A CSS `width` declaration of 1000px or more (four or more digits).
fn fixed_width_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)width\s*:\s*\d{4,}px").expect("fixed width regex is valid"))
}

pub struct MobileAnalyzer;

impl Analyzer for MobileAnalyzer {
    fn category(&self) -> Category {
        Category::Mobile
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let mut card = ScoreCard::new(100);

        let viewport = ctx
            .document
            .meta_by_name("viewport")
            .map(|tag| tag.attr("content").unwrap_or("").to_string());

        match &viewport {
            None => {
                card.penalize(MISSING_VIEWPORT_PENALTY);
                card.finding("No viewport meta tag found");
                card.recommend(
                    "Add: <meta name='viewport' content='width=device-width, initial-scale=1'>",
                );
            }
            Some(content) => {
                card.finding(format!("Viewport found: {content}"));
                if !content.contains("width=device-width") {
                    card.penalize(NO_DEVICE_WIDTH_PENALTY);
                    card.finding("Viewport missing 'width=device-width'");
                    card.recommend("Add width=device-width to viewport content");
                }
            }
        }

        let media_queries: usize = ctx
            .document
            .find_all("style")
            .iter()
            .map(|style| style.text().matches("@media").count())
            .sum();
        if media_queries > 0 {
            card.finding(format!("Found {media_queries} media query references"));
        }

        let fixed_width = fixed_width_re().is_match(ctx.document.raw());
        if fixed_width {
            card.penalize(FIXED_WIDTH_PENALTY);
            card.finding(
                "Fixed widths >1000px detected - may cause horizontal scrolling on mobile",
            );
            card.recommend("Use relative units (%, vw, rem) instead of large fixed pixel widths");
        }

        card.raw(
            "viewport",
            viewport.map_or(serde_json::Value::Null, serde_json::Value::String),
        );
        card.raw("media_queries", media_queries);
        card.raw("fixed_width_detected", fixed_width);
        card.finish()
    }
}
