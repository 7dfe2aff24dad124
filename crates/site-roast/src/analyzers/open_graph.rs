//! Open Graph social metadata analyzer.

use serde_json::{Map, Value};

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

/// Properties checked, with what each one controls.
const OG_PROPERTIES: [(&str, &str); 5] = [
    ("og:title", "Title for social sharing"),
    ("og:description", "Description for social sharing"),
    ("og:image", "Image displayed when shared"),
    ("og:url", "Canonical URL"),
    ("og:type", "Content type (website, article, etc.)"),
];

const MAX_RECOMMENDATIONS: usize = 3;

pub struct OpenGraphAnalyzer;

impl Analyzer for OpenGraphAnalyzer {
    fn category(&self) -> Category {
        Category::OpenGraph
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let mut found = Map::new();
        let mut missing = Vec::new();

        for (property, why) in OG_PROPERTIES {
            let content = ctx
                .document
                .meta_by_property(property)
                .and_then(|tag| tag.attr("content"))
                .filter(|c| !c.is_empty());
            match content {
                Some(content) => {
                    found.insert(property.to_string(), Value::String(content.to_string()));
                }
                None => missing.push((property, why)),
            }
        }

        let total = OG_PROPERTIES.len();
        let mut card = ScoreCard::new(coverage_score(found.len(), total));
        card.finding(format!("Open Graph tags found: {}/{total}", found.len()));

        for (property, why) in missing.iter().take(MAX_RECOMMENDATIONS) {
            card.recommend(format!("Add {property}: {why}"));
        }

        let twitter_card = ctx.document.meta_by_name("twitter:card").is_some();
        if twitter_card {
            card.finding("Twitter Card tags also present ✓");
        } else {
            card.recommend("Consider adding Twitter Card meta tags for better X/Twitter sharing");
        }

        card.raw("found_tags", Value::Object(found));
        card.raw(
            "missing_tags",
            missing.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
        );
        card.raw("twitter_card", twitter_card);
        card.finish()
    }
}

/// `round(100 * found / total)`, half up.
fn coverage_score(found: usize, total: usize) -> i32 {
    ((200 * found + total) / (2 * total)) as i32
}
