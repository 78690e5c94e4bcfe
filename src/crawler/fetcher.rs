//! Page fetching
//!
//! The `PageFetcher` trait is the boundary to the outside world: given a URL
//! it produces a `PageSnapshot` or an error. The production implementation is
//! `HttpFetcher`, a reqwest client with a descriptive audit user agent. The
//! trait seam keeps the crawl controller independent of how pages are
//! actually rendered.

use crate::config::UserAgentConfig;
use crate::crawler::parser::{extract_facts, PageLink};
use crate::ScanError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// One fetched page's raw facts
///
/// Produced once per crawled URL and never mutated after creation. The crawl
/// controller owns snapshots until they are handed to the analyzer.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    /// The normalized URL that was fetched
    pub url: Url,

    /// HTTP status code of the response
    pub status_code: u16,

    /// Raw HTML body
    pub html: String,

    /// Wall-clock time the fetch took, in milliseconds
    pub load_time_ms: u64,

    /// Body size in bytes
    pub byte_size: usize,

    /// Links found on the page, with internal/external classification
    pub links: Vec<PageLink>,
}

/// Boundary trait for turning URLs into page snapshots
///
/// Implementations must treat each call independently; the controller applies
/// its own per-fetch timeout on top of whatever the implementation does.
pub trait PageFetcher {
    /// Fetches a page and produces its snapshot
    ///
    /// A non-2xx response is an error: the crawl records it as a failed page
    /// rather than analyzing an error document.
    fn fetch_page(
        &self,
        url: &Url,
    ) -> impl std::future::Future<Output = Result<PageSnapshot, ScanError>> + Send;

    /// Fetches a plain-text resource (robots.txt, sitemap.xml)
    ///
    /// Returns `None` for any failure; absence of these resources degrades
    /// gracefully and must never abort a crawl.
    fn fetch_text(&self, url: &str) -> impl std::future::Future<Output = Option<String>> + Send;
}

/// HTTP page fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds an HTTP fetcher with the audit user agent and a request timeout
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Identity configuration for the User-Agent header
    /// * `timeout_ms` - Per-request timeout in milliseconds
    pub fn new(user_agent: &UserAgentConfig, timeout_ms: u64) -> Result<Self, ScanError> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(Duration::from_millis(timeout_ms))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<PageSnapshot, ScanError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        let load_time_ms = started.elapsed().as_millis() as u64;
        let byte_size = html.len();
        let links = extract_facts(&html, url).links;

        Ok(PageSnapshot {
            url: url.clone(),
            status_code: status.as_u16(),
            html,
            load_time_ms,
            byte_size,
            links,
        })
    }

    async fn fetch_text(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                tracing::debug!("No usable response for {url}: HTTP {}", response.status());
                None
            }
            Err(e) => {
                tracing::debug!("Failed to fetch {url}: {e}");
                None
            }
        }
    }
}

/// Maps a reqwest error to the crawl error taxonomy
fn classify_error(url: &Url, error: reqwest::Error) -> ScanError {
    if error.is_timeout() {
        ScanError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScanError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fetcher() {
        let ua = UserAgentConfig::default();
        assert!(HttpFetcher::new(&ua, 5_000).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_text_absent_resource() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&UserAgentConfig::default(), 5_000).unwrap();
        let text = fetcher
            .fetch_text(&format!("{}/robots.txt", server.uri()))
            .await;
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_fetch_page_success_and_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><a href=\"/next\">n</a></body></html>"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&UserAgentConfig::default(), 5_000).unwrap();

        let ok_url = Url::parse(&format!("{}/ok", server.uri())).unwrap();
        let snapshot = fetcher.fetch_page(&ok_url).await.unwrap();
        assert_eq!(snapshot.status_code, 200);
        assert_eq!(snapshot.links.len(), 1);
        assert!(snapshot.byte_size > 0);

        let gone_url = Url::parse(&format!("{}/gone", server.uri())).unwrap();
        let err = fetcher.fetch_page(&gone_url).await.unwrap_err();
        assert!(matches!(err, ScanError::HttpStatus { status: 404, .. }));
    }
}
