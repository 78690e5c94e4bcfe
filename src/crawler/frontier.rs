//! URL frontier: the discovery queue and de-duplication set
//!
//! The frontier owns every URL the crawl knows about. URLs are identified by
//! their normalized form, so tracking-parameter and trailing-slash variants
//! of the same page can never be enqueued twice. The known set is capped at
//! twice the page budget, independent of the budget itself, so a site with a
//! huge link graph cannot grow memory without bound.

use crate::url::{is_asset_path, normalize_url};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO discovery queue with normalized-URL de-duplication
///
/// Seed and sitemap URLs are offered before any link-discovered URL, so the
/// FIFO order gives breadth-first exploration from known-good sources before
/// speculative link-following.
#[derive(Debug)]
pub struct Frontier {
    /// URLs accepted but not yet drawn for crawling, in discovery order
    queue: VecDeque<Url>,

    /// Normalized form of every URL ever accepted (pending or drawn)
    known: HashSet<String>,

    /// Hard ceiling on the known-set size: `2 × max_pages`
    max_known: usize,
}

impl Frontier {
    /// Creates a frontier sized for the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            known: HashSet::new(),
            max_known: max_pages.saturating_mul(2),
        }
    }

    /// Seeds the frontier with the crawl's start URL
    ///
    /// Equivalent to `offer`, named separately so call sites read correctly.
    pub fn seed(&mut self, url: &str) -> bool {
        self.offer(url)
    }

    /// Offers a URL to the frontier
    ///
    /// The URL is normalized and rejected if it is malformed, already known,
    /// points at a non-page asset, or the known set has reached its ceiling.
    ///
    /// # Returns
    ///
    /// `true` if the URL was accepted and enqueued
    pub fn offer(&mut self, url: &str) -> bool {
        let normalized = match normalize_url(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Frontier rejected unparsable URL {url:?}: {e}");
                return false;
            }
        };

        if is_asset_path(normalized.path()) {
            return false;
        }

        let key = normalized.as_str().to_string();

        if self.known.contains(&key) {
            return false;
        }

        if self.known.len() >= self.max_known {
            tracing::debug!(
                "Frontier full ({} known URLs), dropping {key}",
                self.known.len()
            );
            return false;
        }

        self.known.insert(key);
        self.queue.push_back(normalized);
        true
    }

    /// Draws up to `n` URLs in FIFO discovery order
    pub fn next_batch(&mut self, n: usize) -> Vec<Url> {
        let take = n.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    /// Returns true when the queue is empty or the known set has hit its
    /// ceiling. A full frontier may still have pending URLs to draw; it just
    /// cannot accept new ones.
    pub fn is_exhausted_or_full(&self) -> bool {
        self.queue.is_empty() || self.known.len() >= self.max_known
    }

    /// Number of URLs waiting to be drawn
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total number of distinct URLs ever accepted (crawled or pending)
    pub fn known_count(&self) -> usize {
        self.known.len()
    }
}
