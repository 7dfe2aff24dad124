//! `<meta name="description">` analyzer.

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

const GENERIC_PHRASES: &[&str] = &["this is a website", "welcome to", "click here", "learn more"];

const GENERIC_PENALTY: i32 = 20;

pub struct MetaDescriptionAnalyzer;

impl Analyzer for MetaDescriptionAnalyzer {
    fn category(&self) -> Category {
        Category::MetaDescription
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let Some(tag) = ctx.document.meta_by_name("description") else {
            return CategoryResult::new(
                0,
                vec!["No meta description found".to_string()],
                vec!["Add a meta description: <meta name='description' content='...'>".to_string()],
            );
        };

        let content = tag.attr("content").unwrap_or("").trim().to_string();
        let length = content.chars().count();

        let mut card = ScoreCard::new(0);
        card.finding("Meta description found");
        card.finding(format!("Description length: {length} characters"));
        card.raw("length", length);

        if content.is_empty() {
            card.set_score(10);
            card.finding("Meta description is empty");
            card.recommend("Add meaningful content to your meta description");
            card.raw("description", "");
            return card.finish();
        }

        match length {
            150..=160 => {
                card.set_score(100);
                card.finding("Description length is optimal");
            }
            120..=149 | 161..=170 => {
                card.set_score(85);
                card.finding("Description length is good");
                card.recommend("Aim for 150-160 characters for optimal display");
            }
            0..=119 => {
                card.set_score(60);
                card.finding("Description is too short");
                card.recommend("Expand your description to 150-160 characters");
            }
            _ => {
                card.set_score(70);
                card.finding("Description is too long and may be truncated");
                card.recommend("Shorten your description to 150-160 characters");
            }
        }

        let lowered = content.to_lowercase();
        if GENERIC_PHRASES.iter().any(|p| lowered.contains(p)) {
            card.penalize(GENERIC_PENALTY);
            card.finding("Description appears to be generic");
            card.recommend("Write a compelling, unique description that entices clicks");
        }

        card.raw("description", content);
        card.finish()
    }
}
