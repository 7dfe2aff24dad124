//! Report emitters: terminal, Markdown and JSON.
//!
//! Reporters only read a finished [`WebsiteAudit`]. Each one owns a
//! [`Roaster`], which is why rendering takes `&mut self`.

/// Append one formatted line to a `String` buffer.
macro_rules! emitln {
    ($out:expr) => {
        $out.push('\n')
    };
    ($out:expr, $($arg:tt)*) => {{
        $out.push_str(&format!($($arg)*));
        $out.push('\n');
    }};
}

pub mod json;
pub mod markdown;
pub mod terminal;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::roaster::Roaster;
use crate::types::{RoastResult, WebsiteAudit};

pub use json::{JsonCategory, JsonReport, JsonReporter};
pub use markdown::MarkdownReporter;
pub use terminal::TerminalReporter;

/// Flags shared by every reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Professional commentary instead of roasts.
    pub serious: bool,
    /// Include recommendations.
    pub verbose: bool,
    /// Emit ANSI colour escapes (terminal only).
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            serious: false,
            verbose: false,
            color: true,
        }
    }
}

/// Renders an audit to text.
pub trait Reporter {
    fn render(&mut self, audit: &WebsiteAudit) -> RoastResult<String>;
}

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Terminal,
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Terminal => "terminal",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the reporter for `format` with a thread-local RNG.
pub fn reporter(format: ReportFormat, options: ReportOptions) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Terminal => Box::new(TerminalReporter::new(options)),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new(options)),
        ReportFormat::Json => Box::new(JsonReporter::new(options)),
    }
}

/// Render `audit` in one call.
pub fn render(audit: &WebsiteAudit, format: ReportFormat, options: ReportOptions) -> RoastResult<String> {
    reporter(format, options).render(audit)
}

pub(crate) fn roaster_for<R: Rng>(options: &ReportOptions, rng: R) -> Roaster<R> {
    Roaster::with_rng(options.serious, rng)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};

    use crate::types::{Category, CategoryResult, CategoryResults, WebsiteAudit};

    /// A deterministic audit with one weak and nine decent categories.
    pub(crate) fn sample_audit() -> WebsiteAudit {
        let results = CategoryResults::from_fn(|category| match category {
            Category::Title => CategoryResult::new(
                100,
                vec![
                    "Title found: 'Acme Rocket Supplies'".to_string(),
                    "Title length: 20 characters".to_string(),
                ],
                Vec::new(),
            ),
            Category::Schema => CategoryResult::new(
                0,
                vec![
                    "Found 0 JSON-LD script(s)".to_string(),
                    "No structured data found".to_string(),
                ],
                vec![
                    "Add JSON-LD structured data for better search visibility".to_string(),
                    "Consider Organization, WebSite, or Article schema types".to_string(),
                ],
            ),
            Category::Images => CategoryResult::new(
                55,
                (1..=6).map(|i| format!("finding {i}")).collect(),
                (1..=5).map(|i| format!("fix {i}")).collect(),
            )
            .with_raw_data([("total".to_string(), serde_json::json!(4))].into_iter().collect()),
            _ => CategoryResult::new(80, vec![format!("{} looks fine", category)], Vec::new()),
        });
        WebsiteAudit::new(
            "https://example.com/",
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            1234,
            results,
        )
    }
}
