//! Schema.org structured data analyzer (JSON-LD, plus a microdata count).
//!
//! Only the number of JSON-LD blocks affects the score. Each block is parsed
//! best-effort to list the declared `@type`s; a block that fails to parse is
//! skipped and never aborts the analyzer.

use serde_json::Value;

use super::{Analyzer, PageContext, ScoreCard};
use crate::types::{Category, CategoryResult};

const JSONLD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const MICRODATA_SELECTOR: &str = "[itemscope]";

const BASE_SCORE: i32 = 40;
const PER_BLOCK: i32 = 20;
const MAX_LISTED_TYPES: usize = 5;
const UNKNOWN_TYPE: &str = "Unknown";

pub struct SchemaAnalyzer;

impl Analyzer for SchemaAnalyzer {
    fn category(&self) -> Category {
        Category::Schema
    }

    fn analyze(&self, ctx: &PageContext<'_>) -> CategoryResult {
        let blocks = ctx.document.select(JSONLD_SELECTOR);
        let count = blocks.len();

        let mut card = ScoreCard::new(0);
        card.finding(format!("Found {count} JSON-LD script(s)"));

        if count == 0 {
            card.finding("No structured data found");
            card.recommend("Add JSON-LD structured data for better search visibility");
            card.recommend("Consider Organization, WebSite, or Article schema types");
            return card.finish();
        }

        card.set_score((BASE_SCORE + PER_BLOCK * count as i32).min(100));

        let mut types = Vec::new();
        for (index, block) in blocks.iter().enumerate() {
            let text = block.text();
            // an empty block still declares an (unknown) object
            if text.is_empty() {
                types.push(UNKNOWN_TYPE.to_string());
                continue;
            }
            match serde_json::from_str::<Value>(&text) {
                Ok(data) => collect_types(&data, &mut types),
                Err(e) => tracing::debug!("skipping JSON-LD block {index}: {e}"),
            }
        }

        if !types.is_empty() {
            let shown: Vec<&str> = types.iter().take(MAX_LISTED_TYPES).map(String::as_str).collect();
            card.finding(format!("Schema types found: {}", shown.join(", ")));
        }

        let microdata = ctx.document.count(MICRODATA_SELECTOR);
        if microdata > 0 {
            card.finding(format!("Also found {microdata} microdata element(s)"));
        }

        if count < 2 {
            card.recommend(
                "Consider adding more structured data types (BreadcrumbList, Article, etc.)",
            );
        }

        card.raw("jsonld_count", count);
        card.raw("schema_types", types);
        card.raw("microdata_count", microdata);
        card.finish()
    }
}

/// Append the `@type`s declared by a top-level JSON-LD value.
fn collect_types(data: &Value, out: &mut Vec<String>) {
    match data {
        Value::Array(items) => {
            for item in items.iter().filter(|i| i.is_object()) {
                collect_object_types(item, out);
            }
        }
        Value::Object(_) => collect_object_types(data, out),
        _ => {}
    }
}

fn collect_object_types(object: &Value, out: &mut Vec<String>) {
    let graph = object.get("@graph").and_then(Value::as_array);

    match object.get("@type") {
        Some(Value::String(t)) => out.push(t.clone()),
        Some(Value::Array(ts)) => out.extend(ts.iter().filter_map(Value::as_str).map(str::to_string)),
        Some(_) => out.push(UNKNOWN_TYPE.to_string()),
        // A bare @graph container declares nothing itself.
        None if graph.is_some() => {}
        None => out.push(UNKNOWN_TYPE.to_string()),
    }

    if let Some(members) = graph {
        for member in members.iter().filter(|m| m.is_object()) {
            collect_object_types(member, out);
        }
    }
}
