//! Markdown report generation
//!
//! This module renders a `SiteAnalysisResult` as a human-readable markdown
//! report: scores, ranked site-wide issues, recommendations, and a per-page
//! breakdown.

use crate::report::types::{SiteAnalysisResult, SiteWideIssue};
use crate::ScanError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report to a file
///
/// # Arguments
///
/// * `result` - The site analysis result
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(ScanError)` - Failed to write the report
pub fn write_markdown_report(result: &SiteAnalysisResult, output_path: &Path) -> Result<(), ScanError> {
    let markdown = format_markdown_report(result);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a site analysis result as markdown
///
/// # Arguments
///
/// * `result` - The site analysis result
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(result: &SiteAnalysisResult) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# SEO Site Audit\n\n");
    md.push_str(&format!("**Site**: {}\n\n", result.crawl.base_url));
    md.push_str(&format!(
        "**Generated**: {}\n\n",
        result.crawl.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Scores
    md.push_str("## Scores\n\n");
    md.push_str(&format!(
        "**Overall Score**: {}/100\n\n",
        result.overall_score
    ));
    md.push_str("| Category | Score |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| Basic | {} |\n", result.category_scores.basic));
    md.push_str(&format!(
        "| Intermediate | {} |\n",
        result.category_scores.intermediate
    ));
    md.push_str(&format!(
        "| Advanced | {} |\n\n",
        result.category_scores.advanced
    ));

    // Crawl statistics
    md.push_str("## Crawl Statistics\n\n");
    md.push_str(&format!(
        "- **Pages Crawled**: {}\n",
        result.crawl.crawled_pages
    ));
    md.push_str(&format!(
        "- **Pages Discovered**: {}\n",
        result.crawl.total_discovered
    ));
    md.push_str(&format!(
        "- **Sitemap URLs**: {}\n",
        result.crawl.sitemap_urls
    ));
    md.push_str(&format!(
        "- **robots.txt**: {}\n",
        if result.crawl.robots_txt_present {
            "present"
        } else {
            "absent"
        }
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        result.crawl.duration_ms as f64 / 1000.0
    ));

    if !result.crawl.failed_pages.is_empty() {
        md.push_str("### Failed Pages\n\n");
        for url in &result.crawl.failed_pages {
            md.push_str(&format!("- {}\n", url));
        }
        md.push('\n');
    }

    // Check outcome summary
    md.push_str("## Check Summary\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Passed | {} |\n", result.summary.passed));
    md.push_str(&format!("| Warnings | {} |\n", result.summary.warnings));
    md.push_str(&format!("| Failed | {} |\n", result.summary.failed));
    md.push_str(&format!("| Info | {} |\n", result.summary.info));
    md.push_str(&format!(
        "| Total | {} |\n\n",
        result.summary.total_checks
    ));

    // Ranked issues
    if !result.site_issues.is_empty() {
        md.push_str("## Issues\n\n");
        for issue in &result.site_issues {
            format_issue(&mut md, issue);
        }
    }

    // Recommendations
    let recs = &result.recommendations;
    if !recs.critical.is_empty() || !recs.important.is_empty() || !recs.suggestions.is_empty() {
        md.push_str("## Recommendations\n\n");

        if !recs.critical.is_empty() {
            md.push_str("### Critical\n\n");
            for rec in &recs.critical {
                md.push_str(&format!("- {}\n", rec));
            }
            md.push('\n');
        }

        if !recs.important.is_empty() {
            md.push_str("### Important\n\n");
            for rec in &recs.important {
                md.push_str(&format!("- {}\n", rec));
            }
            md.push('\n');
        }

        if !recs.suggestions.is_empty() {
            md.push_str("### Suggestions\n\n");
            for rec in &recs.suggestions {
                md.push_str(&format!("- {}\n", rec));
            }
            md.push('\n');
        }
    }

    // Per-page scores
    if !result.pages.is_empty() {
        md.push_str("## Page Scores\n\n");
        md.push_str("| Page | Score |\n");
        md.push_str("|------|-------|\n");
        for page in &result.pages {
            md.push_str(&format!("| {} | {} |\n", page.url, page.score));
        }
        md.push('\n');
    }

    md
}

/// Formats one ranked issue as a markdown section
fn format_issue(md: &mut String, issue: &SiteWideIssue) {
    md.push_str(&format!(
        "### {} ({})\n\n",
        issue.check,
        issue.status.as_str()
    ));
    md.push_str(&format!(
        "- **Priority**: {}\n",
        issue.priority.as_str()
    ));
    md.push_str(&format!(
        "- **Category**: {}\n",
        issue.category.as_str()
    ));
    md.push_str(&format!(
        "- **Scope**: {} ({} of {} pages, {}%)\n",
        issue.issue_type.as_str(),
        issue.affected_pages,
        issue.total_pages,
        issue.percentage
    ));
    md.push_str(&format!("- **Finding**: {}\n", issue.description));
    md.push_str(&format!(
        "- **Recommendation**: {}\n",
        issue.recommendation
    ));

    if !issue.examples.is_empty() {
        md.push_str("- **Examples**:\n");
        for example in &issue.examples {
            match &example.value {
                Some(value) => md.push_str(&format!("  - {} ({})\n", example.url, value)),
                None => md.push_str(&format!("  - {}\n", example.url)),
            }
        }
    }
    md.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{CheckCategory, IssuePriority, IssueStatus, PageAnalysis};
    use crate::report::types::{
        CategoryScores, CrawlSummary, IssueExample, IssueScope, IssueSummary, Recommendations,
    };

    fn create_test_result() -> SiteAnalysisResult {
        SiteAnalysisResult {
            crawl: CrawlSummary {
                base_url: "https://example.com/".to_string(),
                crawled_pages: 12,
                failed_pages: vec!["https://example.com/broken".to_string()],
                total_discovered: 20,
                sitemap_urls: 8,
                robots_txt_present: true,
                duration_ms: 4500,
                generated_at: chrono::Utc::now(),
            },
            overall_score: 72,
            category_scores: CategoryScores {
                basic: 65,
                intermediate: 80,
                advanced: 75,
            },
            summary: IssueSummary {
                total_checks: 132,
                passed: 100,
                warnings: 20,
                failed: 10,
                info: 2,
            },
            site_issues: vec![SiteWideIssue {
                category: CheckCategory::Basic,
                check: "title".to_string(),
                status: IssueStatus::Fail,
                priority: IssuePriority::High,
                affected_pages: 10,
                total_pages: 12,
                percentage: 83,
                issue_type: IssueScope::SiteWide,
                examples: vec![IssueExample {
                    url: "https://example.com/a".to_string(),
                    value: Some("missing".to_string()),
                }],
                description: "Page has no title tag".to_string(),
                recommendation: "Add a unique title to every page".to_string(),
            }],
            pages: vec![PageAnalysis {
                url: "https://example.com/a".to_string(),
                score: 60,
                issues: Vec::new(),
            }],
            recommendations: Recommendations {
                critical: vec!["[Site-wide: 83% of pages] title: Add a unique title".to_string()],
                important: Vec::new(),
                suggestions: vec!["[2 pages] word-count: Add more content".to_string()],
            },
        }
    }

    #[test]
    fn test_format_contains_scores() {
        let markdown = format_markdown_report(&create_test_result());

        assert!(markdown.contains("# SEO Site Audit"));
        assert!(markdown.contains("**Overall Score**: 72/100"));
        assert!(markdown.contains("| Basic | 65 |"));
        assert!(markdown.contains("| Intermediate | 80 |"));
        assert!(markdown.contains("| Advanced | 75 |"));
    }

    #[test]
    fn test_format_contains_crawl_statistics() {
        let markdown = format_markdown_report(&create_test_result());

        assert!(markdown.contains("**Pages Crawled**: 12"));
        assert!(markdown.contains("**Pages Discovered**: 20"));
        assert!(markdown.contains("**robots.txt**: present"));
        assert!(markdown.contains("https://example.com/broken"));
    }

    #[test]
    fn test_format_contains_ranked_issue() {
        let markdown = format_markdown_report(&create_test_result());

        assert!(markdown.contains("### title (fail)"));
        assert!(markdown.contains("**Priority**: high"));
        assert!(markdown.contains("site-wide (10 of 12 pages, 83%)"));
        assert!(markdown.contains("https://example.com/a (missing)"));
    }

    #[test]
    fn test_format_contains_recommendations() {
        let markdown = format_markdown_report(&create_test_result());

        assert!(markdown.contains("### Critical"));
        assert!(markdown.contains("### Suggestions"));
        assert!(!markdown.contains("### Important"));
    }

    #[test]
    fn test_write_markdown_report() {
        let result = create_test_result();
        let file = tempfile::NamedTempFile::new().unwrap();

        write_markdown_report(&result, file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("# SEO Site Audit"));
    }
}
