//! `<title>` analyzer: presence, length band and generic wording.

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

/// Words that mark a title as boilerplate.
const GENERIC_TITLE_WORDS: &[&str] = &["home", "untitled", "index", "page", "website"];

const GENERIC_PENALTY: i32 = 30;

pub struct TitleAnalyzer;

impl Analyzer for TitleAnalyzer {
    fn category(&self) -> Category {
        Category::Title
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let title = ctx
            .document
            .find_first("title")
            .map(|node| node.text())
            .unwrap_or_default();

        if title.is_empty() {
            return CategoryResult::new(
                0,
                vec!["No title tag found".to_string()],
                vec!["Add a <title> tag to your <head> section".to_string()],
            );
        }

        let length = title.chars().count();
        let mut card = ScoreCard::new(0);
        card.finding(format!("Title found: '{title}'"));
        card.finding(format!("Title length: {length} characters"));

        match length {
            50..=60 => {
                card.set_score(100);
                card.finding("Title length is optimal for search engines");
            }
            30..=49 | 61..=70 => {
                card.set_score(80);
                card.finding("Title length is acceptable but could be improved");
                card.recommend("Aim for 50-60 characters for optimal display");
            }
            0..=29 => {
                card.set_score(50);
                card.finding("Title is too short");
                card.recommend("Expand your title to 50-60 characters");
            }
            _ => {
                card.set_score(60);
                card.finding("Title is too long and may be truncated in search results");
                card.recommend("Shorten your title to 50-60 characters");
            }
        }

        let lowered = title.to_lowercase();
        if GENERIC_TITLE_WORDS.iter().any(|w| lowered.contains(w)) {
            card.penalize(GENERIC_PENALTY);
            card.finding("Title appears to be generic");
            card.recommend("Use a descriptive, unique title that describes your page content");
        }

        card.raw("title", title);
        card.raw("length", length);
        card.finish()
    }
}
