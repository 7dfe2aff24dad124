//! Core data types for category results and complete audits.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;
use crate::scores::{self, Grade};

/// One of the ten fixed audit dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    MetaDescription,
    Headings,
    Images,
    Mobile,
    SslSecurity,
    Performance,
    Links,
    OpenGraph,
    Schema,
}

impl Category {
    /// Every category in declaration (and report) order.
    pub const ALL: [Category; 10] = [
        Category::Title,
        Category::MetaDescription,
        Category::Headings,
        Category::Images,
        Category::Mobile,
        Category::SslSecurity,
        Category::Performance,
        Category::Links,
        Category::OpenGraph,
        Category::Schema,
    ];

    /// Stable machine key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::MetaDescription => "meta_description",
            Category::Headings => "headings",
            Category::Images => "images",
            Category::Mobile => "mobile",
            Category::SslSecurity => "ssl_security",
            Category::Performance => "performance",
            Category::Links => "links",
            Category::OpenGraph => "open_graph",
            Category::Schema => "schema",
        }
    }

    /// Human-readable name used in reports.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Title => "Title Tag",
            Category::MetaDescription => "Meta Description",
            Category::Headings => "Headings",
            Category::Images => "Images",
            Category::Mobile => "Mobile",
            Category::SslSecurity => "SSL/Security",
            Category::Performance => "Performance",
            Category::Links => "Links",
            Category::OpenGraph => "Open Graph",
            Category::Schema => "Schema/Structured Data",
        }
    }

    /// Look a category up by its machine key.
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Score, findings and recommendations produced by one analyzer.
///
/// Findings and recommendations are ordered most important first. The score
/// is clamped to `0..=100` on construction and the value is never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    score: u8,
    max_score: u8,
    findings: Vec<String>,
    recommendations: Vec<String>,
    #[serde(default)]
    raw_data: BTreeMap<String, serde_json::Value>,
}

impl CategoryResult {
    pub const MAX_SCORE: u8 = 100;

    /// Build a result, clamping `score` into `0..=100`.
    pub fn new(score: i32, findings: Vec<String>, recommendations: Vec<String>) -> Self {
        Self {
            score: score.clamp(0, Self::MAX_SCORE as i32) as u8,
            max_score: Self::MAX_SCORE,
            findings,
            recommendations,
            raw_data: BTreeMap::new(),
        }
    }

    /// Attach raw measurement data.
    pub fn with_raw_data(mut self, raw_data: BTreeMap<String, serde_json::Value>) -> Self {
        self.raw_data = raw_data;
        self
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn max_score(&self) -> u8 {
        self.max_score
    }

    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn raw_data(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.raw_data
    }

    /// Look up a single raw data entry.
    pub fn raw(&self, key: &str) -> Option<&serde_json::Value> {
        self.raw_data.get(key)
    }
}

/// The ten category results of an audit, one slot per category.
///
/// Serialized as an object whose keys follow [`Category::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResults {
    title: CategoryResult,
    meta_description: CategoryResult,
    headings: CategoryResult,
    images: CategoryResult,
    mobile: CategoryResult,
    ssl_security: CategoryResult,
    performance: CategoryResult,
    links: CategoryResult,
    open_graph: CategoryResult,
    schema: CategoryResult,
}

impl CategoryResults {
    /// Fill every slot by calling `f` once per category, in declaration order.
    pub fn from_fn(mut f: impl FnMut(Category) -> CategoryResult) -> Self {
        Self {
            title: f(Category::Title),
            meta_description: f(Category::MetaDescription),
            headings: f(Category::Headings),
            images: f(Category::Images),
            mobile: f(Category::Mobile),
            ssl_security: f(Category::SslSecurity),
            performance: f(Category::Performance),
            links: f(Category::Links),
            open_graph: f(Category::OpenGraph),
            schema: f(Category::Schema),
        }
    }

    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Title => &self.title,
            Category::MetaDescription => &self.meta_description,
            Category::Headings => &self.headings,
            Category::Images => &self.images,
            Category::Mobile => &self.mobile,
            Category::SslSecurity => &self.ssl_security,
            Category::Performance => &self.performance,
            Category::Links => &self.links,
            Category::OpenGraph => &self.open_graph,
            Category::Schema => &self.schema,
        }
    }

    /// Iterate `(category, result)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// All ten scores in report order.
    pub fn scores(&self) -> [u8; 10] {
        Category::ALL.map(|c| self.get(c).score())
    }
}

/// Complete audit of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteAudit {
    url: String,
    fetched_at: DateTime<Utc>,
    duration_ms: u64,
    results: CategoryResults,
}

impl WebsiteAudit {
    pub fn new(
        url: impl Into<String>,
        fetched_at: DateTime<Utc>,
        duration_ms: u64,
        results: CategoryResults,
    ) -> Self {
        Self {
            url: url.into(),
            fetched_at,
            duration_ms,
            results,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn results(&self) -> &CategoryResults {
        &self.results
    }

    pub fn result(&self, category: Category) -> &CategoryResult {
        self.results.get(category)
    }

    /// Rounded mean of the ten category scores.
    pub fn overall_score(&self) -> u8 {
        scores::overall_score(self)
    }

    /// Letter grade for [`WebsiteAudit::overall_score`].
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.overall_score())
    }
}

/// Errors surfaced by the auditor, reporters and score utilities.
#[derive(thiserror::Error, Debug)]
pub enum RoastError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scores and weights must have the same length ({scores} vs {weights})")]
    MismatchedLengths { scores: usize, weights: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type RoastResult<T> = Result<T, RoastError>;
