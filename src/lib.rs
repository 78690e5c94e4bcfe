//! Seoscan: a site-wide SEO audit engine
//!
//! This crate crawls one website from a start URL (seeded from its sitemap,
//! bounded by a page budget, honoring robots.txt), analyzes each fetched page
//! against a fixed set of SEO checks, and aggregates the per-page results into
//! a single prioritized site report.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod report;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for seoscan operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No pages could be crawled from {url}")]
    NothingCrawled { url: String },

    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for seoscan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{analyze_page, IssuePriority, IssueStatus, PageAnalysis};
pub use config::{CrawlOptions, ScanConfig};
pub use crawler::{CrawlController, HttpFetcher, PageFetcher, PageSnapshot, SiteCrawlResult};
pub use report::{aggregate, SiteAnalysisResult, SiteWideIssue};
pub use url::{extract_domain, normalize_url, same_site};
