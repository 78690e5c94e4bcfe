//! Report data model
//!
//! All types here are derived artifacts: they are recomputed from scratch on
//! every run and never hand-constructed outside the aggregator.

use crate::analyzer::{CheckCategory, IssuePriority, IssueStatus, PageAnalysis};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether an issue recurs across most of the site or is page-specific
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueScope {
    #[serde(rename = "site-wide")]
    SiteWide,

    #[serde(rename = "page-specific")]
    PageSpecific,
}

impl IssueScope {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueScope::SiteWide => "site-wide",
            IssueScope::PageSpecific => "page-specific",
        }
    }
}

/// One example occurrence of a site-wide issue, for report readability
#[derive(Debug, Clone, Serialize)]
pub struct IssueExample {
    pub url: String,
    pub value: Option<String>,
}

/// A cross-page aggregate of one check outcome
#[derive(Debug, Clone, Serialize)]
pub struct SiteWideIssue {
    /// Check tier
    pub category: CheckCategory,

    /// Check identifier
    pub check: String,

    /// The per-page outcome this group aggregates
    pub status: IssueStatus,

    /// Priority after site-wide escalation
    pub priority: IssuePriority,

    /// Number of pages with this outcome
    pub affected_pages: usize,

    /// Number of pages analyzed
    pub total_pages: usize,

    /// `round(affected_pages / total_pages × 100)`
    pub percentage: u8,

    /// Site-wide when at least half the pages are affected
    pub issue_type: IssueScope,

    /// Up to 5 example occurrences in first-encountered order
    pub examples: Vec<IssueExample>,

    /// Description taken from the underlying per-page issue
    pub description: String,

    /// Recommendation taken from the underlying per-page issue
    pub recommendation: String,
}

/// Scores per check tier, each 0-100
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryScores {
    pub basic: u8,
    pub intermediate: u8,
    pub advanced: u8,
}

/// Counts of per-page check outcomes across the whole crawl
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IssueSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub info: usize,
}

/// Recommendation strings partitioned by urgency
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendations {
    /// From high-priority issues
    pub critical: Vec<String>,

    /// From medium-priority issues
    pub important: Vec<String>,

    /// From low-priority issues
    pub suggestions: Vec<String>,
}

/// Crawl statistics carried into the report
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub base_url: String,
    pub crawled_pages: usize,
    pub failed_pages: Vec<String>,
    pub total_discovered: usize,
    pub sitemap_urls: usize,
    pub robots_txt_present: bool,
    pub duration_ms: u64,
    pub generated_at: DateTime<Utc>,
}

/// The terminal, immutable artifact of one audit run
#[derive(Debug, Clone, Serialize)]
pub struct SiteAnalysisResult {
    pub crawl: CrawlSummary,

    /// `round(basic×0.4 + intermediate×0.35 + advanced×0.25)`
    pub overall_score: u8,

    pub category_scores: CategoryScores,

    pub summary: IssueSummary,

    /// Ranked site-wide issues: priority, then percentage descending, ties
    /// in discovery order
    pub site_issues: Vec<SiteWideIssue>,

    /// Every page's analysis, in crawl order
    pub pages: Vec<PageAnalysis>,

    pub recommendations: Recommendations,
}
