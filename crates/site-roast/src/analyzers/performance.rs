//! Static performance indicators: page weight and resource counts.
//!
//! Nothing is timed. The score comes from two independent brackets, the
//! size of the response body and the number of external CSS/JS files; only
//! the highest matching step of each bracket applies.

use super::{Analyzer, PageContext, ScoreCard};
use crate::document::Node;
use crate::types::{Category, CategoryResult};

/// A penalty step that applies above `over`.
struct Bracket<T> {
    over: T,
    penalty: i32,
    finding: &'static str,
    recommendation: Option<&'static str>,
}

/// Page weight in KB, highest first.
const SIZE_BRACKETS: [Bracket<f64>; 3] = [
    Bracket {
        over: 2000.0,
        penalty: 30,
        finding: "Page is very large (>2MB)",
        recommendation: Some("Optimize images and minify CSS/JS to reduce page size"),
    },
    Bracket {
        over: 1000.0,
        penalty: 15,
        finding: "Page is quite large (>1MB)",
        recommendation: Some("Consider compressing images and lazy loading"),
    },
    Bracket {
        over: 500.0,
        penalty: 5,
        finding: "Page is moderately large",
        recommendation: None,
    },
];

/// External CSS plus JS files, highest first.
const RESOURCE_BRACKETS: [Bracket<usize>; 2] = [
    Bracket {
        over: 20,
        penalty: 15,
        finding: "Excessive external resources",
        recommendation: Some("Combine and minify CSS/JS files to reduce HTTP requests"),
    },
    Bracket {
        over: 10,
        penalty: 5,
        finding: "Many external resources",
        recommendation: Some("Consider combining some CSS/JS files"),
    },
];

const MAX_BLOCKING_CSS: usize = 3;
const MODERN_IMAGE_EXTENSIONS: [&str; 2] = [".webp", ".avif"];

pub struct PerformanceAnalyzer;

impl Analyzer for PerformanceAnalyzer {
    fn category(&self) -> Category {
        Category::Performance
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let mut card = ScoreCard::new(100);

        let size_kb = ctx.page.size_bytes() as f64 / 1024.0;
        card.finding(format!("Page size: {size_kb:.1} KB"));

        if let Some(step) = SIZE_BRACKETS.iter().find(|b| size_kb > b.over) {
            card.penalize(step.penalty);
            card.finding(step.finding);
            if let Some(rec) = step.recommendation {
                card.recommend(rec);
            }
        }

        let stylesheets: Vec<Node<'_>> = ctx
            .document
            .find_all("link")
            .into_iter()
            .filter(|link| link.rel_tokens().iter().any(|t| t == "stylesheet"))
            .collect();
        let css_files = stylesheets.len();
        let js_files = ctx
            .document
            .find_all("script")
            .iter()
            .filter(|script| script.has_attr("src"))
            .count();
        let images = ctx.document.find_all("img");

        card.finding(format!(
            "External resources: {css_files} CSS, {js_files} JS, {} images",
            images.len()
        ));

        let total_external = css_files + js_files;
        if let Some(step) = RESOURCE_BRACKETS.iter().find(|b| total_external > b.over) {
            card.penalize(step.penalty);
            card.finding(format!("{} ({total_external})", step.finding));
            if let Some(rec) = step.recommendation {
                card.recommend(rec);
            }
        }

        let render_blocking = stylesheets
            .iter()
            .filter(|link| link.attr("media") != Some("print"))
            .count();
        if render_blocking > MAX_BLOCKING_CSS {
            card.recommend("Consider loading non-critical CSS asynchronously");
        }

        let modern_images = images
            .iter()
            .filter(|img| {
                let src = img.attr("src").unwrap_or("").to_ascii_lowercase();
                MODERN_IMAGE_EXTENSIONS.iter().any(|ext| src.contains(ext))
            })
            .count();
        if !images.is_empty() && modern_images == 0 {
            card.recommend("Consider using WebP format for better compression");
        }

        card.raw("size_kb", (size_kb * 10.0).round() / 10.0);
        card.raw("css_files", css_files);
        card.raw("js_files", js_files);
        card.raw("image_count", images.len());
        card.raw("render_blocking_css", render_blocking);
        card.raw("modern_images", modern_images);
        card.finish()
    }
}
