//! Markdown report.

use rand::rngs::ThreadRng;
use rand::Rng;

use super::{roaster_for, ReportOptions, Reporter};
use crate::roaster::Roaster;
use crate::scores::Grade;
use crate::types::{Category, CategoryResult, RoastResult, WebsiteAudit};

fn grade_icon(grade: Grade) -> &'static str {
    match grade.letter() {
        'A' => "🌟",
        'B' => "✅",
        'C' => "⚠️",
        'D' => "🔧",
        _ => "💀",
    }
}

/// Coarse single-letter grade for the summary table.
pub fn mini_grade(score: u8) -> &'static str {
    match score {
        93..=u8::MAX => "A",
        85..=92 => "B",
        75..=84 => "C",
        65..=74 => "D",
        _ => "F",
    }
}

pub fn status(score: u8) -> &'static str {
    match score {
        80..=u8::MAX => "✅ Good",
        60..=79 => "⚠️ Needs Work",
        _ => "🔴 Poor",
    }
}

pub struct MarkdownReporter<R: Rng = ThreadRng> {
    options: ReportOptions,
    roaster: Roaster<R>,
}

impl MarkdownReporter<ThreadRng> {
    pub fn new(options: ReportOptions) -> Self {
        Self::with_rng(options, rand::thread_rng())
    }
}

impl<R: Rng> MarkdownReporter<R> {
    pub fn with_rng(options: ReportOptions, rng: R) -> Self {
        Self {
            roaster: roaster_for(&options, rng),
            options,
        }
    }

    fn category(&mut self, out: &mut String, category: Category, result: &CategoryResult) {
        let score = result.score();
        emitln!(out, "### {}: {score}/100", category.display_name());
        emitln!(out);
        emitln!(out, "*{}*", self.roaster.comment(score, category));
        emitln!(out);

        if !result.findings().is_empty() {
            emitln!(out, "**Findings:**");
            for finding in result.findings() {
                emitln!(out, "- {finding}");
            }
            emitln!(out);
        }

        if self.options.verbose && !result.recommendations().is_empty() {
            emitln!(out, "**Recommendations:**");
            for rec in result.recommendations() {
                emitln!(out, "- {rec}");
            }
            emitln!(out);
        }
    }
}

impl<R: Rng> Reporter for MarkdownReporter<R> {
    fn render(&mut self, audit: &WebsiteAudit) -> RoastResult<String> {
        let mut out = String::new();
        let grade = audit.grade();
        let score = audit.overall_score();

        emitln!(out, "# 🔥 Site Roast Report");
        emitln!(out);
        emitln!(out, "**Target:** `{}`  ", audit.url());
        emitln!(
            out,
            "**Audited:** {}  ",
            audit.fetched_at().format("%Y-%m-%d %H:%M:%S UTC")
        );
        emitln!(out, "**Duration:** {}ms", audit.duration_ms());
        emitln!(out);

        emitln!(
            out,
            "## {} Overall Grade: **{grade}** ({score}/100)",
            grade_icon(grade)
        );
        emitln!(out);
        emitln!(out, "> {}", self.roaster.overall(grade, score));
        emitln!(out);

        emitln!(out, "## 📊 Category Summary");
        emitln!(out);
        emitln!(out, "| Category | Score | Grade | Status |");
        emitln!(out, "|----------|-------|-------|--------|");
        for (category, result) in audit.results().iter() {
            let s = result.score();
            emitln!(
                out,
                "| {} | {s}/100 | {} | {} |",
                category.display_name(),
                mini_grade(s),
                status(s)
            );
        }
        emitln!(out);

        emitln!(out, "## 🔍 Detailed Analysis");
        emitln!(out);
        for (category, result) in audit.results().iter() {
            self.category(&mut out, category, result);
        }

        emitln!(out, "---");
        emitln!(out);
        emitln!(out, "*Generated by site-roast*");
        Ok(out)
    }
}
