//! Per-page SEO analysis
//!
//! A pure, synchronous fold of one `PageSnapshot` through the rule checks.
//! Each check is an independent function over extracted page facts; checks
//! never interact, and analysis has no state beyond its inputs.

mod checks;

pub use checks::run_checks;

use crate::crawler::{extract_facts, PageSnapshot};
use serde::Serialize;

/// Outcome of one check on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Pass,
    Fail,
    Warning,
    Info,
}

impl IssueStatus {
    /// Contribution of this status to the page score
    pub fn weight(self) -> f64 {
        match self {
            IssueStatus::Pass => 1.0,
            IssueStatus::Info => 0.9,
            IssueStatus::Warning => 0.5,
            IssueStatus::Fail => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Pass => "pass",
            IssueStatus::Fail => "fail",
            IssueStatus::Warning => "warning",
            IssueStatus::Info => "info",
        }
    }
}

/// Urgency of addressing an issue
///
/// Variant order is ranking order: `High` sorts before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    High,
    Medium,
    Low,
}

impl IssuePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            IssuePriority::High => "high",
            IssuePriority::Medium => "medium",
            IssuePriority::Low => "low",
        }
    }
}

/// Check tier, weighted into the overall site score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckCategory {
    Basic,
    Intermediate,
    Advanced,
}

impl CheckCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckCategory::Basic => "basic",
            CheckCategory::Intermediate => "intermediate",
            CheckCategory::Advanced => "advanced",
        }
    }
}

/// One check's outcome on one page
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Check tier
    pub category: CheckCategory,

    /// Stable check identifier (e.g. "title", "image-alt")
    pub check: &'static str,

    /// Outcome of the check
    pub status: IssueStatus,

    /// Base urgency defined by the check; the aggregator may escalate it
    /// site-wide
    pub priority: IssuePriority,

    /// The observed value the check judged, when one exists
    pub current_value: Option<String>,

    /// Human description of the finding
    pub description: String,

    /// What to do about it
    pub recommendation: String,
}

/// One page's analysis: its score and issue list, immutable once created
#[derive(Debug, Clone, Serialize)]
pub struct PageAnalysis {
    /// The analyzed page's URL
    pub url: String,

    /// Page score, 0-100
    pub score: u8,

    /// Every check outcome for this page
    pub issues: Vec<Issue>,
}

/// Analyzes one page snapshot
///
/// Extracts structured facts from the snapshot's HTML and folds them through
/// every rule check. Pure: same snapshot, same analysis.
pub fn analyze_page(snapshot: &PageSnapshot) -> PageAnalysis {
    let facts = extract_facts(&snapshot.html, &snapshot.url);
    let issues = run_checks(snapshot, &facts);
    let score = page_score(&issues);

    PageAnalysis {
        url: snapshot.url.to_string(),
        score,
        issues,
    }
}

/// Computes a page score from its issue list
///
/// `round(Σ weight(status) / issue_count × 100)`; a page with zero issues
/// scores 100.
pub fn page_score(issues: &[Issue]) -> u8 {
    if issues.is_empty() {
        return 100;
    }

    let total: f64 = issues.iter().map(|i| i.status.weight()).sum();
    (total / issues.len() as f64 * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(status: IssueStatus) -> Issue {
        Issue {
            category: CheckCategory::Basic,
            check: "test",
            status,
            priority: IssuePriority::Low,
            current_value: None,
            description: String::new(),
            recommendation: String::new(),
        }
    }

    #[test]
    fn test_empty_issue_list_scores_100() {
        assert_eq!(page_score(&[]), 100);
    }

    #[test]
    fn test_all_pass_scores_100() {
        let issues = vec![issue(IssueStatus::Pass), issue(IssueStatus::Pass)];
        assert_eq!(page_score(&issues), 100);
    }

    #[test]
    fn test_all_fail_scores_0() {
        let issues = vec![issue(IssueStatus::Fail), issue(IssueStatus::Fail)];
        assert_eq!(page_score(&issues), 0);
    }

    #[test]
    fn test_mixed_statuses() {
        // pass(1.0) + warning(0.5) = 1.5 / 2 = 75
        let issues = vec![issue(IssueStatus::Pass), issue(IssueStatus::Warning)];
        assert_eq!(page_score(&issues), 75);
    }

    #[test]
    fn test_info_weight() {
        // info alone: 0.9 -> 90
        let issues = vec![issue(IssueStatus::Info)];
        assert_eq!(page_score(&issues), 90);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(IssuePriority::High < IssuePriority::Medium);
        assert!(IssuePriority::Medium < IssuePriority::Low);
    }
}
