//! Crawl controller: the main crawl orchestration logic
//!
//! One `crawl()` call owns one frontier, one exclusion rule set, and one
//! accumulating list of page snapshots; nothing survives the call except the
//! returned `SiteCrawlResult`. The loop is single-threaded control flow
//! dispatching a bounded batch of concurrent fetches: all fetch results are
//! joined before the frontier is touched, so no locking is needed anywhere.

use crate::config::CrawlOptions;
use crate::crawler::fetcher::{PageFetcher, PageSnapshot};
use crate::crawler::frontier::Frontier;
use crate::crawler::sitemap::resolve_sitemap;
use crate::crawler::origin_of;
use crate::robots::ExclusionRules;
use crate::url::{extract_domain, normalize_url};
use crate::ScanError;
use futures::future::join_all;
use std::time::{Duration, Instant};
use url::Url;

/// Progress notification: invoked once per successfully crawled page with the
/// 1-based crawled count and the configured page budget. Notification only,
/// never a control input.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// The terminal artifact of one crawl
#[derive(Debug)]
pub struct SiteCrawlResult {
    /// Normalized start URL
    pub base_url: Url,

    /// Base domain of the crawled site
    pub base_domain: String,

    /// Total distinct URLs discovered (crawled, pending, and drawn)
    pub total_pages: usize,

    /// Number of successfully crawled pages
    pub crawled_pages: usize,

    /// URLs whose fetch failed (timeout, network error, non-2xx)
    pub failed_pages: Vec<String>,

    /// Snapshots of every successfully crawled page, in crawl order
    pub pages: Vec<PageSnapshot>,

    /// Same-site URLs the sitemap contributed to the frontier
    pub sitemap_urls: Vec<Url>,

    /// Raw robots.txt content, if the site served one
    pub robots_txt: Option<String>,

    /// Wall-clock duration of the whole crawl
    pub crawl_duration: Duration,
}

/// Outcome of one URL within a batch
enum FetchOutcome {
    Crawled(Box<PageSnapshot>),
    Failed(String),
    Skipped,
}

/// Orchestrates one bounded, polite, concurrent crawl of a site
pub struct CrawlController<F> {
    fetcher: F,
    options: CrawlOptions,
    on_page_crawled: Option<ProgressCallback>,
}

impl<F: PageFetcher> CrawlController<F> {
    /// Creates a controller over a fetcher
    ///
    /// Options are clamped into their documented bounds (`max_pages` 1-500,
    /// `concurrency` at least 1) before use.
    pub fn new(fetcher: F, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            options: options.clamped(),
            on_page_crawled: None,
        }
    }

    /// Attaches a progress callback
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_page_crawled = Some(callback);
        self
    }

    /// Crawls the site reachable from `start_url`
    ///
    /// # Algorithm
    ///
    /// 1. Fetch and parse robots.txt (fail-open on any error)
    /// 2. Resolve the sitemap and seed the frontier: start URL first, then
    ///    sitemap URLs, so link-discovered URLs queue behind known-good ones
    /// 3. Repeatedly draw a batch of up to `concurrency` URLs, fetch them
    ///    concurrently (each under its own timeout), then harvest internal
    ///    links from the successes back into the frontier
    /// 4. Sleep the politeness delay between batches
    ///
    /// The crawl stops when the frontier is empty or the successful-page
    /// count reaches `max_pages`. A zero-page result is returned, not
    /// raised; callers surface it as a user-facing failure.
    pub async fn crawl(&self, start_url: &str) -> Result<SiteCrawlResult, ScanError> {
        let started = Instant::now();
        let base_url = normalize_url(start_url)?;
        let base_domain = extract_domain(&base_url).ok_or(crate::UrlError::MissingDomain)?;

        tracing::info!("Starting crawl of {base_url} (budget: {} pages)", self.options.max_pages);

        // Robots.txt is fetched even when not respected, so the report can
        // still show what the site's policy would have been.
        let robots_txt = match origin_of(&base_url) {
            Some(origin) => {
                self.fetcher
                    .fetch_text(&format!("{}/robots.txt", origin))
                    .await
            }
            None => None,
        };

        let rules = if self.options.respect_robots_txt {
            let rules = ExclusionRules::parse(robots_txt.as_deref());
            tracing::debug!("Parsed {} robots.txt disallow rules", rules.len());
            rules
        } else {
            ExclusionRules::allow_all()
        };

        let sitemap_urls = resolve_sitemap(
            &self.fetcher,
            &base_url,
            &base_domain,
            self.options.max_pages,
        )
        .await;

        let mut frontier = Frontier::new(self.options.max_pages);
        frontier.seed(base_url.as_str());
        for url in &sitemap_urls {
            frontier.offer(url.as_str());
        }

        let mut pages: Vec<PageSnapshot> = Vec::new();
        let mut failed_pages: Vec<String> = Vec::new();

        while pages.len() < self.options.max_pages {
            let remaining = self.options.max_pages - pages.len();
            let batch = frontier.next_batch(self.options.concurrency.min(remaining));
            if batch.is_empty() {
                tracing::info!("Frontier exhausted, crawl complete");
                break;
            }

            let outcomes = join_all(batch.into_iter().map(|url| self.fetch_one(url, &rules))).await;

            // Frontier and result mutation happen here, on the control task,
            // strictly after the whole batch has settled.
            for outcome in outcomes {
                match outcome {
                    FetchOutcome::Crawled(snapshot) => {
                        self.harvest_links(&snapshot, &base_domain, &rules, &mut frontier);
                        pages.push(*snapshot);
                        if let Some(callback) = &self.on_page_crawled {
                            callback(pages.len(), self.options.max_pages);
                        }
                    }
                    FetchOutcome::Failed(url) => failed_pages.push(url),
                    FetchOutcome::Skipped => {}
                }
            }

            let budget_left = pages.len() < self.options.max_pages;
            if budget_left && frontier.pending() > 0 && self.options.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.options.delay_ms)).await;
            }
        }

        let result = SiteCrawlResult {
            base_url,
            base_domain,
            total_pages: frontier.known_count(),
            crawled_pages: pages.len(),
            failed_pages,
            pages,
            sitemap_urls,
            robots_txt,
            crawl_duration: started.elapsed(),
        };

        tracing::info!(
            "Crawl finished: {} crawled, {} failed, {} discovered in {:?}",
            result.crawled_pages,
            result.failed_pages.len(),
            result.total_pages,
            result.crawl_duration
        );

        Ok(result)
    }

    /// Fetches one URL under the exclusion rules and the per-fetch timeout
    async fn fetch_one(&self, url: Url, rules: &ExclusionRules) -> FetchOutcome {
        if !rules.is_allowed(&url) {
            // Exclusion is not a failure: the URL is dropped silently
            tracing::debug!("Skipping {url}: disallowed by robots.txt");
            return FetchOutcome::Skipped;
        }

        let timeout = Duration::from_millis(self.options.timeout_ms);
        match tokio::time::timeout(timeout, self.fetcher.fetch_page(&url)).await {
            Ok(Ok(snapshot)) => {
                tracing::debug!(
                    "Fetched {url}: HTTP {} in {}ms",
                    snapshot.status_code,
                    snapshot.load_time_ms
                );
                FetchOutcome::Crawled(Box::new(snapshot))
            }
            Ok(Err(e)) => {
                tracing::warn!("Fetch failed for {url}: {e}");
                FetchOutcome::Failed(url.to_string())
            }
            Err(_elapsed) => {
                tracing::warn!(
                    "Fetch timed out for {url} after {}ms",
                    self.options.timeout_ms
                );
                FetchOutcome::Failed(url.to_string())
            }
        }
    }

    /// Offers a snapshot's internal, same-site, allowed links to the frontier
    ///
    /// Disallowed discovered links are dropped here, not merely skipped at
    /// fetch time, so they never occupy frontier capacity.
    fn harvest_links(
        &self,
        snapshot: &PageSnapshot,
        base_domain: &str,
        rules: &ExclusionRules,
        frontier: &mut Frontier,
    ) {
        for link in &snapshot.links {
            if !link.is_internal {
                continue;
            }

            let Ok(normalized) = normalize_url(&link.href) else {
                continue;
            };

            let on_site = extract_domain(&normalized)
                .map(|d| crate::url::same_site(&d, base_domain))
                .unwrap_or(false);
            if !on_site {
                continue;
            }

            if !rules.is_allowed(&normalized) {
                tracing::debug!("Dropping discovered link {normalized}: disallowed");
                continue;
            }

            frontier.offer(normalized.as_str());
        }
    }
}
