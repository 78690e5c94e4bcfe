//! Site-level report module
//!
//! This module folds the per-page analyses and crawl statistics into one
//! `SiteAnalysisResult` and renders it as markdown or JSON. The aggregation
//! is deterministic: the same inputs always produce the same ranking.

mod aggregate;
mod markdown;
mod types;

pub use aggregate::aggregate;
pub use markdown::{format_markdown_report, write_markdown_report};
pub use types::{
    CategoryScores, CrawlSummary, IssueExample, IssueScope, IssueSummary, Recommendations,
    SiteAnalysisResult, SiteWideIssue,
};

use crate::ScanError;

/// Renders a report as pretty-printed JSON
///
/// The JSON form is the `SiteAnalysisResult` serialized unmodified, so
/// downstream consumers see exactly the structures documented here.
pub fn render_json(result: &SiteAnalysisResult) -> Result<String, ScanError> {
    Ok(serde_json::to_string_pretty(result)?)
}
