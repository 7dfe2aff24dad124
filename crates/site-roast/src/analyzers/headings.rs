//! Heading structure analyzer (H1-H6).

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";
/// Skipped transitions listed in the finding.
const MAX_REPORTED_SKIPS: usize = 3;

pub struct HeadingsAnalyzer;

impl Analyzer for HeadingsAnalyzer {
    fn category(&self) -> Category {
        Category::Headings
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let headings = ctx.document.select(HEADING_SELECTOR);
        let levels: Vec<u8> = headings.iter().filter_map(|h| h.heading_level()).collect();
        let count = |level: u8| levels.iter().filter(|l| **l == level).count();
        let (h1, h2, h3) = (count(1), count(2), count(3));

        let mut card = ScoreCard::new(100);
        card.finding(format!("Found {h1} H1, {h2} H2, {h3} H3 tags"));

        match h1 {
            0 => {
                card.penalize(40);
                card.finding("No H1 tag found - every page needs one main heading");
                card.recommend("Add an H1 tag that describes your main content");
            }
            1 => {
                let text = headings
                    .iter()
                    .find(|h| h.heading_level() == Some(1))
                    .map(|h| h.text())
                    .unwrap_or_default();
                if text.is_empty() {
                    card.penalize(15);
                    card.finding("H1 tag is empty");
                    card.recommend("Add text content to your H1 tag");
                } else {
                    card.finding(format!("H1 content: '{}'", preview(&text, 50)));
                }
            }
            n => {
                card.penalize(20);
                card.finding(format!(
                    "Multiple H1 tags found ({n}). Use only one H1 per page."
                ));
                card.recommend("Consolidate to a single H1 tag");
            }
        }

        let skips = skipped_levels(&levels);
        if !skips.is_empty() {
            card.penalize(10);
            let shown: Vec<String> = skips
                .iter()
                .take(MAX_REPORTED_SKIPS)
                .map(|(from, to)| format!("H{from} -> H{to}"))
                .collect();
            card.finding(format!(
                "Skipped heading levels detected: {}",
                shown.join(", ")
            ));
            card.recommend("Maintain proper heading hierarchy (don't skip from H1 to H3)");
        }

        if levels.is_empty() {
            card.set_score(0);
            card.finding("No heading tags found at all");
            card.recommend("Structure your content with proper heading tags (H1-H6)");
        }

        card.raw("h1_count", h1);
        card.raw("h2_count", h2);
        card.raw("h3_count", h3);
        card.raw("total_headings", levels.len());
        card.finish()
    }
}

/// Every transition in document order where a level jumps more than one
/// step deeper than its predecessor. The walk starts at level 0.
fn skipped_levels(levels: &[u8]) -> Vec<(u8, u8)> {
    let mut previous = 0u8;
    let mut skips = Vec::new();
    for &level in levels {
        if level > previous + 1 {
            skips.push((previous, level));
        }
        previous = level;
    }
    skips
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{page, Fixture};

    fn score_body(body: &str) -> CategoryResult {
        Fixture::new("https://example.com/", &page("<title>t</title>", body)).run(&HeadingsAnalyzer)
    }

    #[test]
    fn test_single_h1_scores_full() {
        let result = score_body("<h1>Handmade ceramics</h1><p>text</p>");
        assert_eq!(result.score(), 100);
        assert_eq!(result.raw("h1_count"), Some(&serde_json::json!(1)));
        assert_eq!(result.raw("total_headings"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_no_headings_forces_zero() {
        let result = score_body("<p>nothing to see</p>");
        assert_eq!(result.score(), 0);
        assert!(result
            .findings()
            .iter()
            .any(|f| f == "No heading tags found at all"));
    }

    #[test]
    fn test_missing_h1() {
        // -40 for no H1, -10 for the H0 -> H2 skip
        let result = score_body("<h2>Section</h2><h3>Sub</h3>");
        assert_eq!(result.score(), 50);
    }

    #[test]
    fn test_multiple_h1() {
        let result = score_body("<h1>One</h1><h2>a</h2><h1>Two</h1>");
        assert_eq!(result.score(), 80);
    }

    #[test]
    fn test_empty_h1() {
        let result = score_body("<h1>   </h1><h2>Section</h2>");
        assert_eq!(result.score(), 85);
    }

    #[test]
    fn test_skip_penalty_applies_once() {
        let result = score_body("<h1>T</h1><h3>a</h3><h1>x</h1><h4>b</h4><h2>c</h2><h6>d</h6>");
        // -20 multiple H1, -10 once for skips
        assert_eq!(result.score(), 70);
        let finding = result
            .findings()
            .iter()
            .find(|f| f.starts_with("Skipped heading levels"))
            .unwrap();
        assert_eq!(
            finding,
            "Skipped heading levels detected: H1 -> H3, H1 -> H4, H2 -> H6"
        );
    }

    #[test]
    fn test_skipped_levels_walk() {
        assert!(skipped_levels(&[1, 2, 3, 2, 3]).is_empty());
        assert_eq!(skipped_levels(&[2]), vec![(0, 2)]);
        assert_eq!(skipped_levels(&[1, 3, 4, 6]), vec![(1, 3), (4, 6)]);
    }

    #[test]
    fn test_long_h1_is_previewed() {
        let text = "x".repeat(80);
        let result = score_body(&format!("<h1>{text}</h1>"));
        let expected = format!("H1 content: '{}...'", "x".repeat(50));
        assert!(result.findings().contains(&expected));
    }
}
