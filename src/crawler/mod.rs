//! Crawler module: bounded, polite, concurrent site crawling
//!
//! This module contains the crawl engine:
//! - The URL frontier (discovery queue + de-duplication)
//! - The page fetcher seam and its HTTP implementation
//! - DOM fact extraction from fetched HTML
//! - Sitemap resolution for seeding the frontier
//! - The controller that orchestrates one bounded crawl

mod controller;
mod fetcher;
mod frontier;
mod parser;
mod sitemap;

pub use controller::{CrawlController, ProgressCallback, SiteCrawlResult};
pub use fetcher::{HttpFetcher, PageFetcher, PageSnapshot};
pub use frontier::Frontier;
pub use parser::{extract_facts, PageFacts, PageLink};
pub use sitemap::resolve_sitemap;

use url::Url;

/// Returns the origin of a URL: `scheme://host[:port]`
///
/// Used to address well-known site resources (robots.txt, sitemap.xml)
/// relative to the start URL.
pub(crate) fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let port = url
        .port()
        .map(|p| format!(":{}", p))
        .unwrap_or_default();
    Some(format!("{}://{}{}", url.scheme(), host, port))
}
