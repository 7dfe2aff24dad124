//! site-roast: single-page website auditor with ten scored categories, a letter grade, and a roast.

pub mod analyzers;
pub mod auditor;
pub mod config;
pub mod document;
pub mod fetch;
pub mod report;
pub mod roaster;
pub mod scores;
pub mod types;

pub use analyzers::{Analyzer, PageContext};
pub use auditor::{audit_page, Auditor};
pub use config::AuditConfig;
pub use document::{Document, Node};
pub use fetch::{FetchError, FetchedPage, Fetcher, HttpFetcher, ResponseHeaders};
pub use report::{
    render, reporter, JsonReport, JsonReporter, MarkdownReporter, ReportFormat, ReportOptions,
    Reporter, TerminalReporter,
};
pub use roaster::Roaster;
pub use scores::{calculate_average, weighted_average, Grade, ScoreBand};
pub use types::*;
