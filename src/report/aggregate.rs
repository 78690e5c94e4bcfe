//! Site aggregation
//!
//! Folds N unordered per-page issue lists into one deterministic, explainable
//! ranking. Every page analysis is scanned exactly once; issues are grouped
//! by `category:check:status`, classified by how much of the site they
//! affect, escalated when pervasive, and ranked stably.

use crate::analyzer::{CheckCategory, IssuePriority, IssueStatus, PageAnalysis};
use crate::crawler::SiteCrawlResult;
use crate::report::types::{
    CategoryScores, CrawlSummary, IssueExample, IssueScope, IssueSummary, Recommendations,
    SiteAnalysisResult, SiteWideIssue,
};
use std::collections::HashMap;

/// A fail outcome on at least this share of pages is escalated to high
const FAIL_ESCALATION_PCT: u8 = 80;

/// A warning outcome on at least this share of pages is escalated to medium
const WARNING_ESCALATION_PCT: u8 = 50;

/// At least this share of pages makes an issue site-wide
const SITE_WIDE_PCT: u8 = 50;

/// Overall-score weights per tier. Fixed policy, not tunable per run: the
/// tiers reflect the relative SEO impact of their checks.
const BASIC_WEIGHT: f64 = 0.40;
const INTERMEDIATE_WEIGHT: f64 = 0.35;
const ADVANCED_WEIGHT: f64 = 0.25;

/// Maximum example occurrences retained per site-wide issue
const MAX_EXAMPLES: usize = 5;

/// One `category:check:status` group under construction
struct IssueGroup {
    category: CheckCategory,
    check: String,
    status: IssueStatus,
    base_priority: IssuePriority,
    description: String,
    recommendation: String,
    affected: Vec<IssueExample>,
}

/// Aggregates per-page analyses and crawl statistics into the site report
///
/// The aggregator assumes well-formed inputs: malformed analyzer output is a
/// contract violation at that boundary, not something defended against here.
///
/// # Arguments
///
/// * `page_analyses` - One analysis per successfully crawled page
/// * `crawl` - The crawl result the analyses were produced from
pub fn aggregate(page_analyses: Vec<PageAnalysis>, crawl: &SiteCrawlResult) -> SiteAnalysisResult {
    let total_pages = page_analyses.len();

    // Single scan: group issues in discovery order and tally the summary
    let mut groups: Vec<IssueGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut summary = IssueSummary::default();

    for analysis in &page_analyses {
        for issue in &analysis.issues {
            summary.total_checks += 1;
            match issue.status {
                IssueStatus::Pass => summary.passed += 1,
                IssueStatus::Fail => summary.failed += 1,
                IssueStatus::Warning => summary.warnings += 1,
                IssueStatus::Info => summary.info += 1,
            }

            let key = format!(
                "{}:{}:{}",
                issue.category.as_str(),
                issue.check,
                issue.status.as_str()
            );

            let index = *group_index.entry(key).or_insert_with(|| {
                groups.push(IssueGroup {
                    category: issue.category,
                    check: issue.check.to_string(),
                    status: issue.status,
                    base_priority: issue.priority,
                    description: issue.description.clone(),
                    recommendation: issue.recommendation.clone(),
                    affected: Vec::new(),
                });
                groups.len() - 1
            });

            groups[index].affected.push(IssueExample {
                url: analysis.url.clone(),
                value: issue.current_value.clone(),
            });
        }
    }

    // Classify, escalate, and rank
    let mut site_issues: Vec<SiteWideIssue> = groups
        .into_iter()
        .filter_map(|group| build_site_issue(group, total_pages))
        .collect();

    // Stable sort keeps discovery order for ties
    site_issues.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(b.percentage.cmp(&a.percentage))
    });

    let category_scores = compute_category_scores(&site_issues);
    let overall_score = overall_score(category_scores);
    let recommendations = build_recommendations(&site_issues);

    SiteAnalysisResult {
        crawl: CrawlSummary {
            base_url: crawl.base_url.to_string(),
            crawled_pages: crawl.crawled_pages,
            failed_pages: crawl.failed_pages.clone(),
            total_discovered: crawl.total_pages,
            sitemap_urls: crawl.sitemap_urls.len(),
            robots_txt_present: crawl.robots_txt.is_some(),
            duration_ms: crawl.crawl_duration.as_millis() as u64,
            generated_at: chrono::Utc::now(),
        },
        overall_score,
        category_scores,
        summary,
        site_issues,
        pages: page_analyses,
        recommendations,
    }
}

/// Turns one group into a reportable site-wide issue, if it qualifies
///
/// A universal pass is not reported: only incomplete passes and any non-pass
/// outcome are surfaced.
fn build_site_issue(group: IssueGroup, total_pages: usize) -> Option<SiteWideIssue> {
    let affected_pages = group.affected.len();

    if group.status == IssueStatus::Pass && affected_pages == total_pages {
        return None;
    }

    let percentage = if total_pages == 0 {
        0
    } else {
        (affected_pages as f64 / total_pages as f64 * 100.0).round() as u8
    };

    let issue_type = if percentage >= SITE_WIDE_PCT {
        IssueScope::SiteWide
    } else {
        IssueScope::PageSpecific
    };

    let priority = escalate_priority(group.base_priority, group.status, percentage);

    let mut examples = group.affected;
    examples.truncate(MAX_EXAMPLES);

    Some(SiteWideIssue {
        category: group.category,
        check: group.check,
        status: group.status,
        priority,
        affected_pages,
        total_pages,
        percentage,
        issue_type,
        examples,
        description: group.description,
        recommendation: group.recommendation,
    })
}

/// Raises a group's priority when the defect is pervasive
///
/// A fail on ≥80% of pages becomes high; a warning on ≥50% becomes at least
/// medium. Escalation only ever raises urgency.
fn escalate_priority(base: IssuePriority, status: IssueStatus, percentage: u8) -> IssuePriority {
    match status {
        IssueStatus::Fail if percentage >= FAIL_ESCALATION_PCT => IssuePriority::High,
        IssueStatus::Warning if percentage >= WARNING_ESCALATION_PCT => {
            // High stays high; medium and low become medium
            base.min(IssuePriority::Medium)
        }
        _ => base,
    }
}

/// Derives per-tier scores from the reported site issues
///
/// `round(mean(1 - percentage/100) × 100)` over the issues in each tier: an
/// issue affecting every page drives its tier toward 0. A tier with no
/// reported issues scores exactly 100.
fn compute_category_scores(site_issues: &[SiteWideIssue]) -> CategoryScores {
    let score_for = |category: CheckCategory| -> u8 {
        let percentages: Vec<f64> = site_issues
            .iter()
            .filter(|issue| issue.category == category)
            .map(|issue| 1.0 - issue.percentage as f64 / 100.0)
            .collect();

        if percentages.is_empty() {
            100
        } else {
            (percentages.iter().sum::<f64>() / percentages.len() as f64 * 100.0).round() as u8
        }
    };

    CategoryScores {
        basic: score_for(CheckCategory::Basic),
        intermediate: score_for(CheckCategory::Intermediate),
        advanced: score_for(CheckCategory::Advanced),
    }
}

/// Combines the tier scores into the overall site score
fn overall_score(scores: CategoryScores) -> u8 {
    (scores.basic as f64 * BASIC_WEIGHT
        + scores.intermediate as f64 * INTERMEDIATE_WEIGHT
        + scores.advanced as f64 * ADVANCED_WEIGHT)
        .round() as u8
}

/// Partitions ranked issues into recommendation strings by urgency
///
/// Pass and info groups are deliberately excluded: they carry nothing to act
/// on, so only warning and fail groups render as recommendations.
fn build_recommendations(site_issues: &[SiteWideIssue]) -> Recommendations {
    let mut recommendations = Recommendations::default();

    for issue in site_issues {
        if issue.status == IssueStatus::Pass || issue.status == IssueStatus::Info {
            continue;
        }

        let scope = match issue.issue_type {
            IssueScope::SiteWide => {
                format!("[Site-wide: {}% of pages]", issue.percentage)
            }
            IssueScope::PageSpecific => format!("[{} pages]", issue.affected_pages),
        };
        let text = format!("{} {}: {}", scope, issue.check, issue.recommendation);

        match issue.priority {
            IssuePriority::High => recommendations.critical.push(text),
            IssuePriority::Medium => recommendations.important.push(text),
            IssuePriority::Low => recommendations.suggestions.push(text),
        }
    }

    recommendations
}
