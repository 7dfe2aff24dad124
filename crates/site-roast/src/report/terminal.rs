//! Coloured terminal report.

use rand::rngs::ThreadRng;
use rand::Rng;

use super::{roaster_for, ReportOptions, Reporter};
use crate::roaster::Roaster;
use crate::scores::Grade;
use crate::types::{Category, CategoryResult, RoastResult, WebsiteAudit};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const MAGENTA: &str = "\x1b[95m";
const CYAN: &str = "\x1b[96m";
const WHITE: &str = "\x1b[97m";
const ORANGE: &str = "\x1b[38;5;208m";

const BAR_WIDTH: usize = 20;
const RULE_WIDTH: usize = 64;
const MAX_FINDINGS: usize = 4;
const MAX_RECOMMENDATIONS: usize = 3;

const BANNER: [&str; 6] = [
    "███████╗██╗████████╗███████╗      ██████╗  ██████╗  █████╗ ███████╗████████╗",
    "██╔════╝██║╚══██╔══╝██╔════╝      ██╔══██╗██╔═══██╗██╔══██╗██╔════╝╚══██╔══╝",
    "███████╗██║   ██║   █████╗  █████╗██████╔╝██║   ██║███████║███████╗   ██║",
    "╚════██║██║   ██║   ██╔══╝  ╚════╝██╔══██╗██║   ██║██╔══██║╚════██║   ██║",
    "███████║██║   ██║   ███████╗      ██║  ██║╚██████╔╝██║  ██║███████║   ██║",
    "╚══════╝╚═╝   ╚═╝   ╚══════╝      ╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝   ╚═╝",
];
const TAGLINE: &str = "Gordon Ramsay meets Web Development";

/// Colour for a category score.
pub fn score_color(score: u8) -> &'static str {
    match score {
        80..=u8::MAX => GREEN,
        60..=79 => YELLOW,
        40..=59 => ORANGE,
        _ => RED,
    }
}

fn grade_color(grade: Grade) -> &'static str {
    match grade.letter() {
        'A' => GREEN,
        'B' => CYAN,
        'C' => YELLOW,
        'D' => ORANGE,
        _ => RED,
    }
}

/// Applies ANSI escapes, or nothing when colour is off.
#[derive(Debug, Clone, Copy)]
struct Painter {
    enabled: bool,
}

impl Painter {
    fn paint(&self, text: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, BOLD)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, DIM)
    }
}

/// `score`/100 of `width` cells filled, rounding down.
pub fn progress_bar(score: u8, width: usize) -> String {
    let filled = (width * usize::from(score.min(100))) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub struct TerminalReporter<R: Rng = ThreadRng> {
    options: ReportOptions,
    roaster: Roaster<R>,
}

impl TerminalReporter<ThreadRng> {
    pub fn new(options: ReportOptions) -> Self {
        Self::with_rng(options, rand::thread_rng())
    }
}

impl<R: Rng> TerminalReporter<R> {
    pub fn with_rng(options: ReportOptions, rng: R) -> Self {
        Self {
            roaster: roaster_for(&options, rng),
            options,
        }
    }

    fn painter(&self) -> Painter {
        Painter {
            enabled: self.options.color,
        }
    }

    fn header(&self, out: &mut String) {
        let p = self.painter();
        out.push('\n');
        for line in BANNER {
            emitln!(out, "  {}  {}", p.paint("🔥", YELLOW), p.paint(line, RED));
        }
        emitln!(out, "       {}", p.paint(TAGLINE, YELLOW));
        emitln!(out, "{}", p.paint(&"═".repeat(RULE_WIDTH), RED));
    }

    fn category(&mut self, out: &mut String, category: Category, result: &CategoryResult) {
        let p = self.painter();
        let name = category.display_name();
        let score = result.score();
        let color = score_color(score);

        emitln!(out);
        emitln!(out, "{} {}", p.paint("▶", CYAN), p.bold(name));
        emitln!(
            out,
            "  Score: {} {}",
            p.paint(&format!("{score}/100"), color),
            p.paint(&progress_bar(score, BAR_WIDTH), color)
        );

        let roast = self.roaster.comment(score, category);
        if !roast.is_empty() {
            emitln!(out, "  {} {roast}", p.paint("💬", MAGENTA));
        }
        let context = self.roaster.category_context(category, score);
        if !context.is_empty() {
            emitln!(out, "     {}", p.dim(context));
        }

        if !result.findings().is_empty() {
            emitln!(out, "  {}", p.dim("Findings:"));
            for finding in result.findings().iter().take(MAX_FINDINGS) {
                emitln!(out, "    {} {finding}", p.paint("•", BLUE));
            }
        }

        if self.options.verbose && !result.recommendations().is_empty() {
            emitln!(out, "  {} Recommendations:", p.paint("💡", YELLOW));
            for rec in result.recommendations().iter().take(MAX_RECOMMENDATIONS) {
                emitln!(out, "    {} {rec}", p.paint("→", GREEN));
            }
        }
    }

    fn grade_block(&mut self, out: &mut String, grade: Grade, score: u8) {
        let p = self.painter();
        let rule = p.paint(&"═".repeat(RULE_WIDTH), RED);
        emitln!(out);
        emitln!(out, "{rule}");
        emitln!(out);
        emitln!(out, "{:20}{}", "", p.bold(&p.paint("FINAL GRADE", WHITE)));
        emitln!(out);
        emitln!(out, "{:25}{}", "", p.bold(&p.paint(grade.as_str(), grade_color(grade))));
        emitln!(out, "{:23}{}", "", p.dim(&format!("({score}/100)")));
        emitln!(out);
        let overall = self.roaster.overall(grade, score);
        emitln!(out, "{:11}{}", "", p.paint(&overall, CYAN));
        emitln!(out);
        emitln!(out, "{rule}");
    }
}

impl<R: Rng> Reporter for TerminalReporter<R> {
    fn render(&mut self, audit: &WebsiteAudit) -> RoastResult<String> {
        let p = self.painter();
        let mut out = String::new();

        self.header(&mut out);
        emitln!(out);
        emitln!(out, "{} {}", p.bold("Target:"), p.paint(audit.url(), CYAN));
        emitln!(
            out,
            "{}",
            p.dim(&format!("Audit completed in {}ms", audit.duration_ms()))
        );

        for (category, result) in audit.results().iter() {
            self.category(&mut out, category, result);
        }

        self.grade_block(&mut out, audit.grade(), audit.overall_score());

        emitln!(out);
        emitln!(out, "{}", p.dim("Built with site-roast. We judge so your visitors don't have to."));
        Ok(out)
    }
}
