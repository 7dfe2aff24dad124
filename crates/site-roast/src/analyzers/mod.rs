//! Category analyzers.
//!
//! Each analyzer owns one [`Category`] and turns the shared, read-only
//! [`PageContext`] into a [`CategoryResult`]. Analyzers never fail and never
//! look at each other's output; a feature that is missing or unreadable
//! produces a low score rather than an omitted category.

pub mod headings;
pub mod images;
pub mod links;
pub mod meta_description;
pub mod mobile;
pub mod open_graph;
pub mod performance;
pub mod schema;
pub mod security;
pub mod title;

use std::collections::BTreeMap;

use url::Url;

use crate::document::Document;
use crate::fetch::FetchedPage;
use crate::scores;
use crate::types::{Category, CategoryResult, CategoryResults};

/// Everything an analyzer may read about the audited page.
#[derive(Clone, Copy)]
pub struct PageContext<'a> {
    /// The URL that was audited (before redirects).
    pub url: &'a Url,
    /// Parsed markup.
    pub document: &'a Document,
    /// Status, headers and raw body of the response.
    pub page: &'a FetchedPage,
}

/// Trait implemented by all category analyzers.
pub trait Analyzer: Send + Sync {
    /// The category this analyzer scores.
    fn category(&self) -> Category;

    /// Score the page. Must always return a result.
    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult;
}

/// All analyzers, in category declaration order.
pub fn registry() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(title::TitleAnalyzer),
        Box::new(meta_description::MetaDescriptionAnalyzer),
        Box::new(headings::HeadingsAnalyzer),
        Box::new(images::ImagesAnalyzer),
        Box::new(mobile::MobileAnalyzer),
        Box::new(security::SecurityAnalyzer),
        Box::new(performance::PerformanceAnalyzer),
        Box::new(links::LinksAnalyzer),
        Box::new(open_graph::OpenGraphAnalyzer),
        Box::new(schema::SchemaAnalyzer),
    ]
}

/// Run every registered analyzer over the same page.
pub fn run_all(ctx: &PageContext<'_>) -> CategoryResults {
    let analyzers = registry();
    CategoryResults::from_fn(|category| {
        match analyzers.iter().find(|a| a.category() == category) {
            Some(analyzer) => {
                let result = analyzer.analyze(ctx);
                tracing::debug!("{} scored {}/100", category.key(), result.score());
                result
            }
            None => CategoryResult::new(
                0,
                vec![format!("No analyzer available for {category}")],
                Vec::new(),
            ),
        }
    })
}

/// Accumulates a score with per-step flooring plus ordered findings.
pub(crate) struct ScoreCard {
    score: i32,
    findings: Vec<String>,
    recommendations: Vec<String>,
    raw: BTreeMap<String, serde_json::Value>,
}

impl ScoreCard {
    pub(crate) fn new(base: i32) -> Self {
        Self {
            score: base,
            findings: Vec::new(),
            recommendations: Vec::new(),
            raw: BTreeMap::new(),
        }
    }

    /// Deduct `amount`, flooring at zero.
    pub(crate) fn penalize(&mut self, amount: i32) {
        self.score = scores::penalty(self.score, amount, 0);
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    pub(crate) fn score(&self) -> i32 {
        self.score
    }

    pub(crate) fn finding(&mut self, text: impl Into<String>) {
        self.findings.push(text.into());
    }

    pub(crate) fn recommend(&mut self, text: impl Into<String>) {
        self.recommendations.push(text.into());
    }

    pub(crate) fn raw(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.raw.insert(key.to_string(), value.into());
    }

    pub(crate) fn finish(self) -> CategoryResult {
        CategoryResult::new(self.score, self.findings, self.recommendations).with_raw_data(self.raw)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    #[test]
    fn test_registry_matches_category_order() {
        let order: Vec<Category> = registry().iter().map(|a| a.category()).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_run_all_on_empty_document_yields_ten_results() {
        let fixture = Fixture::new("https://example.com/", "");
        let results = run_all(&fixture.ctx());
        assert_eq!(results.iter().count(), 10);
        for (_, result) in results.iter() {
            assert!(result.score() <= 100);
        }
        assert_eq!(results.get(Category::Title).score(), 0);
        assert_eq!(results.get(Category::Images).score(), 70);
        assert_eq!(results.get(Category::Links).score(), 30);
        assert_eq!(results.get(Category::Schema).score(), 0);
    }

    #[test]
    fn test_score_card_floors_each_step() {
        let mut card = ScoreCard::new(20);
        card.penalize(30);
        assert_eq!(card.score(), 0);
        card.set_score(50);
        card.penalize(10);
        card.finding("f");
        card.recommend("r");
        card.raw("k", 3);
        let result = card.finish();
        assert_eq!(result.score(), 40);
        assert_eq!(result.findings().to_vec(), vec!["f".to_string()]);
        assert_eq!(result.raw("k"), Some(&serde_json::json!(3)));
    }
}
