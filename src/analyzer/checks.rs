//! The SEO rule checks
//!
//! Each check is a pure function over one page's extracted facts, producing
//! exactly one `Issue`. Thresholds follow common SEO guidance: titles of
//! 30-60 characters, meta descriptions of 70-160, a single H1, at least 300
//! words of content.

use crate::analyzer::{CheckCategory, Issue, IssuePriority, IssueStatus};
use crate::crawler::{PageFacts, PageSnapshot};

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const META_DESCRIPTION_MIN: usize = 70;
const META_DESCRIPTION_MAX: usize = 160;
const MIN_WORD_COUNT: usize = 300;
const SLOW_LOAD_MS: u64 = 2_000;
const VERY_SLOW_LOAD_MS: u64 = 5_000;
const LARGE_PAGE_BYTES: usize = 1_500_000;

/// Runs every check against one page
pub fn run_checks(snapshot: &PageSnapshot, facts: &PageFacts) -> Vec<Issue> {
    vec![
        check_https(snapshot),
        check_title(facts),
        check_meta_description(facts),
        check_headings(facts),
        check_image_alt(facts),
        check_canonical(facts),
        check_meta_robots(facts),
        check_word_count(facts),
        check_internal_links(facts),
        check_load_time(snapshot),
        check_page_size(snapshot),
    ]
}

fn check_https(snapshot: &PageSnapshot) -> Issue {
    let (status, description) = if snapshot.url.scheme() == "https" {
        (IssueStatus::Pass, "Page is served over HTTPS".to_string())
    } else {
        (
            IssueStatus::Fail,
            "Page is served over plain HTTP".to_string(),
        )
    };

    Issue {
        category: CheckCategory::Basic,
        check: "https",
        status,
        priority: IssuePriority::High,
        current_value: Some(snapshot.url.scheme().to_string()),
        description,
        recommendation: "Serve all pages over HTTPS and redirect HTTP traffic".to_string(),
    }
}

fn check_title(facts: &PageFacts) -> Issue {
    let (status, description, value) = match &facts.title {
        None => (
            IssueStatus::Fail,
            "Page has no <title> element".to_string(),
            None,
        ),
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_MIN {
                (
                    IssueStatus::Warning,
                    format!("Title is only {} characters", len),
                    Some(title.clone()),
                )
            } else if len > TITLE_MAX {
                (
                    IssueStatus::Warning,
                    format!("Title is {} characters, which search engines truncate", len),
                    Some(title.clone()),
                )
            } else {
                (
                    IssueStatus::Pass,
                    "Title length is within range".to_string(),
                    Some(title.clone()),
                )
            }
        }
    };

    Issue {
        category: CheckCategory::Basic,
        check: "title",
        status,
        priority: IssuePriority::High,
        current_value: value,
        description,
        recommendation: format!(
            "Give every page a unique title of {}-{} characters",
            TITLE_MIN, TITLE_MAX
        ),
    }
}

fn check_meta_description(facts: &PageFacts) -> Issue {
    let (status, description, value) = match &facts.meta_description {
        None => (
            IssueStatus::Fail,
            "Page has no meta description".to_string(),
            None,
        ),
        Some(text) => {
            let len = text.chars().count();
            if len < META_DESCRIPTION_MIN {
                (
                    IssueStatus::Warning,
                    format!("Meta description is only {} characters", len),
                    Some(text.clone()),
                )
            } else if len > META_DESCRIPTION_MAX {
                (
                    IssueStatus::Warning,
                    format!("Meta description is {} characters", len),
                    Some(text.clone()),
                )
            } else {
                (
                    IssueStatus::Pass,
                    "Meta description length is within range".to_string(),
                    Some(text.clone()),
                )
            }
        }
    };

    Issue {
        category: CheckCategory::Basic,
        check: "meta-description",
        status,
        priority: IssuePriority::Medium,
        current_value: value,
        description,
        recommendation: format!(
            "Write a meta description of {}-{} characters for every page",
            META_DESCRIPTION_MIN, META_DESCRIPTION_MAX
        ),
    }
}

fn check_headings(facts: &PageFacts) -> Issue {
    let (status, description) = if facts.h1_count == 0 {
        (IssueStatus::Fail, "Page has no H1 heading".to_string())
    } else if facts.h1_count > 1 {
        (
            IssueStatus::Warning,
            format!("Page has {} H1 headings", facts.h1_count),
        )
    } else {
        (IssueStatus::Pass, "Page has exactly one H1".to_string())
    };

    Issue {
        category: CheckCategory::Basic,
        check: "headings",
        status,
        priority: IssuePriority::Medium,
        current_value: Some(facts.h1_count.to_string()),
        description,
        recommendation: "Use exactly one H1 per page describing its content".to_string(),
    }
}

fn check_image_alt(facts: &PageFacts) -> Issue {
    let (status, description) = if facts.image_count == 0 {
        (IssueStatus::Info, "Page has no images".to_string())
    } else if facts.images_missing_alt > 0 {
        (
            IssueStatus::Warning,
            format!(
                "{} of {} images are missing alt text",
                facts.images_missing_alt, facts.image_count
            ),
        )
    } else {
        (IssueStatus::Pass, "All images have alt text".to_string())
    };

    Issue {
        category: CheckCategory::Basic,
        check: "image-alt",
        status,
        priority: IssuePriority::Medium,
        current_value: Some(format!(
            "{}/{}",
            facts.images_missing_alt, facts.image_count
        )),
        description,
        recommendation: "Add descriptive alt text to every meaningful image".to_string(),
    }
}

fn check_canonical(facts: &PageFacts) -> Issue {
    let (status, description) = match &facts.canonical {
        Some(_) => (IssueStatus::Pass, "Canonical URL is declared".to_string()),
        None => (
            IssueStatus::Warning,
            "Page declares no canonical URL".to_string(),
        ),
    };

    Issue {
        category: CheckCategory::Intermediate,
        check: "canonical",
        status,
        priority: IssuePriority::Medium,
        current_value: facts.canonical.clone(),
        description,
        recommendation: "Declare a canonical URL to consolidate duplicate-content signals"
            .to_string(),
    }
}

fn check_meta_robots(facts: &PageFacts) -> Issue {
    let noindex = facts
        .meta_robots
        .as_deref()
        .map(|v| v.to_lowercase().contains("noindex"))
        .unwrap_or(false);

    let (status, description) = if noindex {
        (
            IssueStatus::Fail,
            "Page is excluded from indexing by meta robots".to_string(),
        )
    } else {
        (IssueStatus::Pass, "Page is indexable".to_string())
    };

    Issue {
        category: CheckCategory::Intermediate,
        check: "meta-robots",
        status,
        priority: IssuePriority::High,
        current_value: facts.meta_robots.clone(),
        description,
        recommendation: "Remove noindex from pages that should appear in search results"
            .to_string(),
    }
}

fn check_word_count(facts: &PageFacts) -> Issue {
    let (status, description) = if facts.word_count < MIN_WORD_COUNT {
        (
            IssueStatus::Warning,
            format!("Page has only {} words of content", facts.word_count),
        )
    } else {
        (IssueStatus::Pass, "Page has substantial content".to_string())
    };

    Issue {
        category: CheckCategory::Intermediate,
        check: "word-count",
        status,
        priority: IssuePriority::Low,
        current_value: Some(facts.word_count.to_string()),
        description,
        recommendation: format!(
            "Aim for at least {} words of useful content per page",
            MIN_WORD_COUNT
        ),
    }
}

fn check_internal_links(facts: &PageFacts) -> Issue {
    let internal = facts.links.iter().filter(|l| l.is_internal).count();

    let (status, description) = if internal == 0 {
        (
            IssueStatus::Warning,
            "Page has no internal links".to_string(),
        )
    } else {
        (
            IssueStatus::Pass,
            format!("Page has {} internal links", internal),
        )
    };

    Issue {
        category: CheckCategory::Intermediate,
        check: "internal-links",
        status,
        priority: IssuePriority::Low,
        current_value: Some(internal.to_string()),
        description,
        recommendation: "Link related pages together so crawlers and users can find them"
            .to_string(),
    }
}

fn check_load_time(snapshot: &PageSnapshot) -> Issue {
    let (status, description) = if snapshot.load_time_ms > VERY_SLOW_LOAD_MS {
        (
            IssueStatus::Fail,
            format!("Page took {}ms to load", snapshot.load_time_ms),
        )
    } else if snapshot.load_time_ms > SLOW_LOAD_MS {
        (
            IssueStatus::Warning,
            format!("Page took {}ms to load", snapshot.load_time_ms),
        )
    } else {
        (IssueStatus::Pass, "Page loads quickly".to_string())
    };

    Issue {
        category: CheckCategory::Advanced,
        check: "load-time",
        status,
        priority: IssuePriority::Medium,
        current_value: Some(format!("{}ms", snapshot.load_time_ms)),
        description,
        recommendation: "Reduce server response time and page weight".to_string(),
    }
}

fn check_page_size(snapshot: &PageSnapshot) -> Issue {
    let (status, description) = if snapshot.byte_size > LARGE_PAGE_BYTES {
        (
            IssueStatus::Warning,
            format!("Page HTML is {} bytes", snapshot.byte_size),
        )
    } else {
        (
            IssueStatus::Pass,
            "Page HTML size is reasonable".to_string(),
        )
    };

    Issue {
        category: CheckCategory::Advanced,
        check: "page-size",
        status,
        priority: IssuePriority::Low,
        current_value: Some(snapshot.byte_size.to_string()),
        description,
        recommendation: "Keep page HTML lean; move large payloads to deferred assets".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn snapshot(html: &str) -> PageSnapshot {
        let url = Url::parse("https://example.com/page").unwrap();
        PageSnapshot {
            url: url.clone(),
            status_code: 200,
            html: html.to_string(),
            load_time_ms: 120,
            byte_size: html.len(),
            links: Vec::new(),
        }
    }

    fn facts_of(html: &str) -> PageFacts {
        crate::crawler::extract_facts(html, &Url::parse("https://example.com/page").unwrap())
    }

    fn find<'a>(issues: &'a [Issue], check: &str) -> &'a Issue {
        issues.iter().find(|i| i.check == check).unwrap()
    }

    #[test]
    fn test_missing_title_fails() {
        let html = "<html><head></head><body></body></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        let issue = find(&issues, "title");
        assert_eq!(issue.status, IssueStatus::Fail);
        assert_eq!(issue.priority, IssuePriority::High);
    }

    #[test]
    fn test_short_title_warns() {
        let html = "<html><head><title>Tiny</title></head><body></body></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        assert_eq!(find(&issues, "title").status, IssueStatus::Warning);
    }

    #[test]
    fn test_good_title_passes() {
        let html =
            "<html><head><title>A perfectly sized page title for search</title></head></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        assert_eq!(find(&issues, "title").status, IssueStatus::Pass);
    }

    #[test]
    fn test_https_check() {
        let mut snap = snapshot("<html></html>");
        assert_eq!(
            find(&run_checks(&snap, &facts_of("")), "https").status,
            IssueStatus::Pass
        );

        snap.url = Url::parse("http://example.com/page").unwrap();
        assert_eq!(
            find(&run_checks(&snap, &facts_of("")), "https").status,
            IssueStatus::Fail
        );
    }

    #[test]
    fn test_noindex_fails() {
        let html = r#"<html><head><meta name="robots" content="NOINDEX"></head></html>"#;
        let issues = run_checks(&snapshot(html), &facts_of(html));
        assert_eq!(find(&issues, "meta-robots").status, IssueStatus::Fail);
    }

    #[test]
    fn test_multiple_h1_warns() {
        let html = "<html><body><h1>a</h1><h1>b</h1></body></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        assert_eq!(find(&issues, "headings").status, IssueStatus::Warning);
    }

    #[test]
    fn test_no_images_is_info() {
        let html = "<html><body><p>text</p></body></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        assert_eq!(find(&issues, "image-alt").status, IssueStatus::Info);
    }

    #[test]
    fn test_missing_alt_warns_with_value() {
        let html = r#"<html><body><img src="a.png"><img src="b.png" alt="ok"></body></html>"#;
        let issues = run_checks(&snapshot(html), &facts_of(html));
        let issue = find(&issues, "image-alt");
        assert_eq!(issue.status, IssueStatus::Warning);
        assert_eq!(issue.current_value.as_deref(), Some("1/2"));
    }

    #[test]
    fn test_slow_load_time() {
        let mut snap = snapshot("<html></html>");
        snap.load_time_ms = 3_000;
        assert_eq!(
            find(&run_checks(&snap, &facts_of("")), "load-time").status,
            IssueStatus::Warning
        );

        snap.load_time_ms = 6_000;
        assert_eq!(
            find(&run_checks(&snap, &facts_of("")), "load-time").status,
            IssueStatus::Fail
        );
    }

    #[test]
    fn test_every_check_reports_once() {
        let html = "<html><head><title>t</title></head><body></body></html>";
        let issues = run_checks(&snapshot(html), &facts_of(html));
        let mut names: Vec<_> = issues.iter().map(|i| i.check).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), issues.len());
    }
}
