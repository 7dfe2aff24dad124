//! Image alt-text coverage analyzer.
//!
//! Every `<img>` is put in one of three buckets:
//! - no `alt` attribute at all (missing)
//! - `alt` present but blank (empty)
//! - `alt` with text
//!
//! The score is the share of images with alt text, minus flat penalties
//! for each non-empty problem bucket. A page without images is neutral.

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

/// Score for pages that contain no images.
const NO_IMAGES_SCORE: i32 = 70;
const MISSING_ALT_PENALTY: i32 = 10;
const EMPTY_ALT_PENALTY: i32 = 5;
/// Lazy-loading is only suggested above this many images.
const LAZY_HINT_MIN_IMAGES: usize = 5;

pub struct ImagesAnalyzer;

impl Analyzer for ImagesAnalyzer {
    fn category(&self) -> Category {
        Category::Images
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let images = ctx.document.find_all("img");
        let total = images.len();

        if total == 0 {
            let mut card = ScoreCard::new(NO_IMAGES_SCORE);
            card.finding("Found 0 image(s)");
            card.finding("No images on page - consider adding visual content");
            card.raw("total", 0);
            return card.finish();
        }

        let mut missing_alt = 0usize;
        let mut empty_alt = 0usize;
        for img in &images {
            match img.attr("alt") {
                None => missing_alt += 1,
                Some(alt) if alt.trim().is_empty() => empty_alt += 1,
                Some(_) => {}
            }
        }
        let with_alt = total - missing_alt - empty_alt;

        let mut card = ScoreCard::new(coverage_score(with_alt, total));
        card.finding(format!("Found {total} image(s)"));
        card.finding(format!("Images with alt text: {with_alt}/{total}"));
        if missing_alt > 0 {
            card.finding(format!("Missing alt attributes: {missing_alt}"));
        }
        if empty_alt > 0 {
            card.finding(format!("Empty alt attributes: {empty_alt}"));
        }

        if missing_alt > 0 {
            card.penalize(MISSING_ALT_PENALTY);
            card.recommend(format!("Add alt attributes to {missing_alt} image(s)"));
        }
        if empty_alt > 0 {
            card.penalize(EMPTY_ALT_PENALTY);
            card.recommend(format!("Add descriptive alt text to {empty_alt} image(s)"));
        }

        let lazy_loaded = images
            .iter()
            .filter(|img| {
                img.attr("loading")
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("lazy"))
            })
            .count();
        if lazy_loaded * 2 < total && total > LAZY_HINT_MIN_IMAGES {
            card.recommend("Consider adding loading='lazy' to images below the fold");
        }

        card.raw("total", total);
        card.raw("with_alt", with_alt);
        card.raw("missing_alt", missing_alt);
        card.raw("empty_alt", empty_alt);
        card.raw("lazy_loaded", lazy_loaded);
        card.finish()
    }
}

/// `round(100 * with_alt / total)`, half up.
fn coverage_score(with_alt: usize, total: usize) -> i32 {
    ((200 * with_alt + total) / (2 * total)) as i32
}
