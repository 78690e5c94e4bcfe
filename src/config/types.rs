use serde::Deserialize;

/// Hard ceiling on the crawl page budget
pub const MAX_PAGE_BUDGET: usize = 500;

/// Main configuration structure for seoscan
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default)]
    pub crawl: CrawlOptions,

    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
///
/// These are the only options the crawl controller recognizes; anything else
/// in a profile is rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlOptions {
    /// Maximum number of successfully crawled pages (clamped to 1-500)
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of concurrent page fetches per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Politeness delay between crawl batches (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Per-fetch timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether to honor robots.txt disallow rules
    #[serde(rename = "respect-robots-txt", default = "default_true")]
    pub respect_robots_txt: bool,
}

fn default_max_pages() -> usize {
    50
}

fn default_concurrency() -> usize {
    5
}

fn default_delay_ms() -> u64 {
    500
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_true() -> bool {
    true
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            concurrency: default_concurrency(),
            delay_ms: default_delay_ms(),
            timeout_ms: default_timeout_ms(),
            respect_robots_txt: true,
        }
    }
}

impl CrawlOptions {
    /// Returns a copy with out-of-range values clamped into their
    /// documented bounds
    ///
    /// `max_pages` is clamped to 1-500 and `concurrency` to at least 1. The
    /// controller always works from a clamped copy, so a misconfigured
    /// profile degrades rather than panics or runs unbounded.
    pub fn clamped(&self) -> Self {
        Self {
            max_pages: self.max_pages.clamp(1, MAX_PAGE_BUDGET),
            concurrency: self.concurrency.max(1),
            ..self.clone()
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAgentConfig {
    /// Name of the audit crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the audit crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

fn default_crawler_name() -> String {
    "SeoscanBot".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://github.com/seoscan/seoscan".to_string()
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the full user agent string: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Path the report is written to; stdout when absent
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,

    /// Report rendering format
    #[serde(default)]
    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: None,
            format: ReportFormat::Markdown,
        }
    }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CrawlOptions::default();
        assert_eq!(options.max_pages, 50);
        assert_eq!(options.concurrency, 5);
        assert!(options.respect_robots_txt);
    }

    #[test]
    fn test_clamp_max_pages_upper() {
        let options = CrawlOptions {
            max_pages: 10_000,
            ..Default::default()
        };
        assert_eq!(options.clamped().max_pages, MAX_PAGE_BUDGET);
    }

    #[test]
    fn test_clamp_max_pages_lower() {
        let options = CrawlOptions {
            max_pages: 0,
            ..Default::default()
        };
        assert_eq!(options.clamped().max_pages, 1);
    }

    #[test]
    fn test_clamp_concurrency() {
        let options = CrawlOptions {
            concurrency: 0,
            ..Default::default()
        };
        assert_eq!(options.clamped().concurrency, 1);
    }

    #[test]
    fn test_user_agent_header_value() {
        let ua = UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        };
        assert_eq!(
            ua.header_value(),
            "TestBot/1.0 (+https://example.com/bot)"
        );
    }
}
