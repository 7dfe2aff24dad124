//! Machine-readable JSON report and its inverse.
//!
//! Every finding and every recommendation is always written, so
//! [`JsonReport::into_audit`] reproduces the audit exactly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::ThreadRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{roaster_for, ReportOptions, Reporter};
use crate::roaster::Roaster;
use crate::scores::Grade;
use crate::types::{Category, CategoryResult, CategoryResults, RoastError, RoastResult, WebsiteAudit};

/// One category in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonCategory {
    pub name: String,
    pub score: u8,
    pub max_score: u8,
    pub findings: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub raw_data: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roast: Option<String>,
}

/// Top-level JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub overall_score: u8,
    pub grade: Grade,
    /// Keyed by category key, in report order.
    pub categories: BTreeMap<Category, JsonCategory>,
}

impl JsonReport {
    /// Build the report for `audit`, without roasts.
    pub fn from_audit(audit: &WebsiteAudit) -> Self {
        Self::build(audit, |_, _| None)
    }

    fn build(
        audit: &WebsiteAudit,
        mut roast: impl FnMut(Category, &CategoryResult) -> Option<String>,
    ) -> Self {
        let categories = audit
            .results()
            .iter()
            .map(|(category, result)| {
                let entry = JsonCategory {
                    name: category.display_name().to_string(),
                    score: result.score(),
                    max_score: result.max_score(),
                    findings: result.findings().to_vec(),
                    recommendations: result.recommendations().to_vec(),
                    raw_data: result.raw_data().clone(),
                    roast: roast(category, result),
                };
                (category, entry)
            })
            .collect();

        Self {
            url: audit.url().to_string(),
            fetched_at: audit.fetched_at(),
            duration_ms: audit.duration_ms(),
            overall_score: audit.overall_score(),
            grade: audit.grade(),
            categories,
        }
    }

    pub fn parse(json: &str) -> RoastResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the audit. Every one of the ten categories must be present.
    pub fn into_audit(self) -> RoastResult<WebsiteAudit> {
        let mut categories = self.categories;
        if let Some(missing) = Category::ALL.iter().find(|c| !categories.contains_key(*c)) {
            return Err(RoastError::Json(serde::de::Error::missing_field(missing.key())));
        }

        let results = CategoryResults::from_fn(|category| {
            categories
                .remove(&category)
                .map(|entry| {
                    CategoryResult::new(
                        i32::from(entry.score),
                        entry.findings,
                        entry.recommendations,
                    )
                    .with_raw_data(entry.raw_data)
                })
                .unwrap_or_else(|| CategoryResult::new(0, Vec::new(), Vec::new()))
        });

        Ok(WebsiteAudit::new(
            self.url,
            self.fetched_at,
            self.duration_ms,
            results,
        ))
    }
}

pub struct JsonReporter<R: Rng = ThreadRng> {
    options: ReportOptions,
    roaster: Roaster<R>,
}

impl JsonReporter<ThreadRng> {
    pub fn new(options: ReportOptions) -> Self {
        Self::with_rng(options, rand::thread_rng())
    }
}

impl<R: Rng> JsonReporter<R> {
    pub fn with_rng(options: ReportOptions, rng: R) -> Self {
        Self {
            roaster: roaster_for(&options, rng),
            options,
        }
    }
}

impl<R: Rng> Reporter for JsonReporter<R> {
    fn render(&mut self, audit: &WebsiteAudit) -> RoastResult<String> {
        let serious = self.options.serious;
        let roaster = &mut self.roaster;
        let report = JsonReport::build(audit, |category, result| {
            (!serious).then(|| roaster.comment(result.score(), category).to_string())
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
