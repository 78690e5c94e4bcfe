//! Robots.txt rule parsing
//!
//! Only `Disallow` lines are honored, and only those under a `User-agent`
//! block matching `*` or any agent name containing "bot". Rules are either
//! plain path prefixes or wildcard patterns (translated to anchored regexes).

use regex::Regex;
use url::Url;

/// A single disallow rule extracted from robots.txt
#[derive(Debug, Clone)]
pub enum ExclusionRule {
    /// Plain path prefix: the URL path must start with this string to match
    Prefix(String),

    /// Wildcard pattern: `*` in the rule matches any run of characters,
    /// anchored at the start of the path
    Wildcard(Regex),
}

impl ExclusionRule {
    /// Checks whether a URL path matches this rule
    fn matches(&self, path: &str) -> bool {
        match self {
            ExclusionRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
            ExclusionRule::Wildcard(pattern) => pattern.is_match(path),
        }
    }
}

/// An ordered, immutable set of disallow rules for the crawling user agents
///
/// Constructed once per crawl from the site's robots.txt (or its absence) and
/// consulted both before each fetch and when harvesting links from fetched
/// pages.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    /// Parses robots.txt content into a rule set
    ///
    /// `None` (robots.txt absent or unfetchable) yields an empty rule set
    /// that allows everything. Lines that cannot be interpreted are skipped.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt text, if any
    pub fn parse(content: Option<&str>) -> Self {
        let Some(content) = content else {
            return Self::allow_all();
        };

        let mut rules = Vec::new();

        // Whether the current user-agent group applies to us, and whether
        // we have seen a rule line since the last agent line. A user-agent
        // line after rule lines starts a fresh group.
        let mut group_applies = false;
        let mut seen_rule_in_group = false;

        for line in content.lines() {
            // Strip inline comments and surrounding whitespace
            let line = match line.split_once('#') {
                Some((before, _)) => before.trim(),
                None => line.trim(),
            };

            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    if seen_rule_in_group {
                        group_applies = false;
                        seen_rule_in_group = false;
                    }
                    if agent_applies(value) {
                        group_applies = true;
                    }
                }
                "disallow" => {
                    seen_rule_in_group = true;

                    // An empty Disallow value allows everything
                    if group_applies && !value.is_empty() {
                        if let Some(rule) = build_rule(value) {
                            rules.push(rule);
                        }
                    }
                }
                _ => {
                    // Allow, Sitemap, Crawl-delay and anything else close the
                    // current agent accumulation like Disallow does
                    seen_rule_in_group = true;
                }
            }
        }

        Self { rules }
    }

    /// Creates a permissive rule set that allows everything
    pub fn allow_all() -> Self {
        Self { rules: Vec::new() }
    }

    /// Checks whether a URL is allowed by the rule set
    ///
    /// A URL is disallowed if its path matches any rule, either by prefix or
    /// by wildcard. An empty rule set allows everything.
    pub fn is_allowed(&self, url: &Url) -> bool {
        self.is_path_allowed(url.path())
    }

    /// Checks whether a raw URL path is allowed by the rule set
    pub fn is_path_allowed(&self, path: &str) -> bool {
        !self.rules.iter().any(|rule| rule.matches(path))
    }

    /// Returns the number of disallow rules in the set
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set carries no rules (everything allowed)
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Checks whether a User-agent value addresses this crawler
///
/// We honor the wildcard agent and any agent whose name contains "bot",
/// since SEO audit crawlers present themselves as one.
fn agent_applies(agent: &str) -> bool {
    let agent = agent.to_lowercase();
    agent == "*" || agent.contains("bot")
}

/// Builds a rule from a Disallow value
///
/// Values containing `*` become anchored regex wildcards; everything else is
/// a plain prefix. A bare `/` is a prefix that matches every path.
fn build_rule(value: &str) -> Option<ExclusionRule> {
    if value.contains('*') {
        let pattern = format!("^{}", regex::escape(value).replace(r"\*", ".*"));
        match Regex::new(&pattern) {
            Ok(re) => Some(ExclusionRule::Wildcard(re)),
            Err(e) => {
                tracing::debug!("Skipping unparsable robots.txt rule {value:?}: {e}");
                None
            }
        }
    } else {
        Some(ExclusionRule::Prefix(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_absent_robots_allows_everything() {
        let rules = ExclusionRules::parse(None);
        assert!(rules.is_allowed(&url("/")));
        assert!(rules.is_allowed(&url("/admin")));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_disallow_all() {
        let rules = ExclusionRules::parse(Some("User-agent: *\nDisallow: /"));
        assert!(!rules.is_allowed(&url("/")));
        assert!(!rules.is_allowed(&url("/page")));
        assert!(!rules.is_allowed(&url("/deeply/nested/page")));
    }

    #[test]
    fn test_prefix_match() {
        let rules = ExclusionRules::parse(Some("User-agent: *\nDisallow: /private"));
        assert!(rules.is_allowed(&url("/")));
        assert!(rules.is_allowed(&url("/public")));
        assert!(!rules.is_allowed(&url("/private")));
        assert!(!rules.is_allowed(&url("/private/data")));
        assert!(!rules.is_allowed(&url("/private-area")));
    }

    #[test]
    fn test_wildcard_match() {
        let rules = ExclusionRules::parse(Some("User-agent: *\nDisallow: /*/print"));
        assert!(rules.is_allowed(&url("/article")));
        assert!(!rules.is_allowed(&url("/article/print")));
        assert!(!rules.is_allowed(&url("/a/b/print")));
    }

    #[test]
    fn test_bot_agent_block_applies() {
        let content = "User-agent: SomeBot\nDisallow: /admin";
        let rules = ExclusionRules::parse(Some(content));
        assert!(!rules.is_allowed(&url("/admin")));
    }

    #[test]
    fn test_unrelated_agent_block_ignored() {
        let content = "User-agent: GoogleOther\nDisallow: /admin";
        let rules = ExclusionRules::parse(Some(content));
        assert!(rules.is_allowed(&url("/admin")));
    }

    #[test]
    fn test_multiple_agents_in_one_group() {
        let content = "User-agent: crawler-x\nUser-agent: *\nDisallow: /secret";
        let rules = ExclusionRules::parse(Some(content));
        assert!(!rules.is_allowed(&url("/secret")));
    }

    #[test]
    fn test_groups_are_separated_by_rules() {
        let content = "User-agent: *\nDisallow: /a\n\nUser-agent: GoogleOther\nDisallow: /b";
        let rules = ExclusionRules::parse(Some(content));
        assert!(!rules.is_allowed(&url("/a")));
        assert!(rules.is_allowed(&url("/b")));
    }

    #[test]
    fn test_empty_disallow_allows() {
        let rules = ExclusionRules::parse(Some("User-agent: *\nDisallow:"));
        assert!(rules.is_allowed(&url("/anything")));
        assert!(rules.is_empty());
    }

    #[test]
    fn test_comments_and_garbage_skipped() {
        let content = "# audit policy\nUser-agent: * # all\nDisallow: /tmp # scratch\nnot a directive\n";
        let rules = ExclusionRules::parse(Some(content));
        assert!(!rules.is_allowed(&url("/tmp")));
        assert!(rules.is_allowed(&url("/")));
    }

    #[test]
    fn test_unparsable_content_fails_open() {
        let rules = ExclusionRules::parse(Some("{{{ binary junk \u{0}\u{1}"));
        assert!(rules.is_allowed(&url("/any/path")));
    }

    #[test]
    fn test_allow_lines_are_ignored_but_close_group() {
        let content = "User-agent: *\nAllow: /public\nUser-agent: GoogleOther\nDisallow: /x";
        let rules = ExclusionRules::parse(Some(content));
        // The Allow line ended the wildcard group, so /x only binds GoogleOther
        assert!(rules.is_allowed(&url("/x")));
        assert!(rules.is_allowed(&url("/public")));
    }
}
