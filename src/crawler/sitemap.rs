//! Sitemap resolution
//!
//! Fetches `/sitemap.xml` and flattens it into same-site page URLs. A
//! `<sitemapindex>` document is followed one level deep, with a fixed cap on
//! child sitemaps so a site sharded into hundreds of sitemaps cannot blow up
//! the seeding phase. Any failure degrades to an empty list: sitemap absence
//! just means the crawl discovers pages through links alone.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::origin_of;
use crate::url::{extract_domain, same_site};
use url::Url;

/// Maximum number of child sitemaps followed from a sitemap index
const MAX_CHILD_SITEMAPS: usize = 10;

/// Resolves a site's sitemap into a bounded list of same-site page URLs
///
/// # Arguments
///
/// * `fetcher` - The fetcher used for the sitemap requests
/// * `base_url` - The crawl's start URL; the sitemap is looked up at its origin
/// * `base_domain` - The site's base domain for same-site filtering
/// * `max_urls` - Maximum number of URLs to return
pub async fn resolve_sitemap<F: PageFetcher>(
    fetcher: &F,
    base_url: &Url,
    base_domain: &str,
    max_urls: usize,
) -> Vec<Url> {
    let Some(origin) = origin_of(base_url) else {
        return Vec::new();
    };

    let Some(body) = fetcher.fetch_text(&format!("{}/sitemap.xml", origin)).await else {
        tracing::debug!("No sitemap.xml at {origin}");
        return Vec::new();
    };

    let locs = if body.contains("<sitemapindex") {
        let children = extract_loc_values(&body);
        tracing::debug!(
            "Sitemap index with {} children, following up to {}",
            children.len(),
            MAX_CHILD_SITEMAPS
        );

        let mut flattened = Vec::new();
        for child in children.into_iter().take(MAX_CHILD_SITEMAPS) {
            if let Some(child_body) = fetcher.fetch_text(&child).await {
                flattened.extend(extract_loc_values(&child_body));
            }
            if flattened.len() >= max_urls {
                break;
            }
        }
        flattened
    } else {
        extract_loc_values(&body)
    };

    let urls: Vec<Url> = locs
        .into_iter()
        .filter_map(|loc| Url::parse(&loc).ok())
        .filter(|url| {
            extract_domain(url)
                .map(|d| same_site(&d, base_domain))
                .unwrap_or(false)
        })
        .take(max_urls)
        .collect();

    tracing::info!("Sitemap yielded {} same-site URLs", urls.len());
    urls
}

/// Extracts the text content of every `<loc>` element in an XML document
///
/// A plain string scan is sufficient here: sitemap `<loc>` values are
/// absolute URLs with no nested markup, and a malformed document simply
/// yields fewer (or zero) entries.
fn extract_loc_values(xml: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0usize;
    while let Some(open_idx) = xml[start..].find("<loc>") {
        let open = start + open_idx + 5;
        let Some(close_rel) = xml[open..].find("</loc>") else {
            break;
        };
        let close = open + close_rel;
        let value = xml[open..close].trim();
        if !value.is_empty() {
            out.push(value.to_string());
        }
        start = close + 6;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Test fetcher serving canned text bodies by URL
    struct TextFetcher {
        bodies: HashMap<String, String>,
    }

    impl PageFetcher for TextFetcher {
        async fn fetch_page(
            &self,
            _url: &Url,
        ) -> Result<crate::crawler::PageSnapshot, crate::ScanError> {
            unimplemented!("sitemap resolution never fetches pages")
        }

        async fn fetch_text(&self, url: &str) -> Option<String> {
            self.bodies.get(url).cloned()
        }
    }

    fn fetcher_with(bodies: &[(&str, &str)]) -> TextFetcher {
        TextFetcher {
            bodies: bodies
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_extract_loc_values() {
        let xml = r#"<urlset>
            <url><loc>https://example.com/a</loc></url>
            <url><loc> https://example.com/b </loc></url>
            <url><loc></loc></url>
        </urlset>"#;
        let locs = extract_loc_values(xml);
        assert_eq!(
            locs,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_extract_loc_unclosed_tag() {
        let xml = "<urlset><url><loc>https://example.com/a</urlset>";
        assert!(extract_loc_values(xml).is_empty());
    }

    #[tokio::test]
    async fn test_plain_urlset() {
        let fetcher = fetcher_with(&[(
            "https://example.com/sitemap.xml",
            "<urlset><url><loc>https://example.com/a</loc></url>\
             <url><loc>https://example.com/b</loc></url></urlset>",
        )]);

        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 50).await;
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].path(), "/a");
    }

    #[tokio::test]
    async fn test_sitemap_index_flattened() {
        let fetcher = fetcher_with(&[
            (
                "https://example.com/sitemap.xml",
                "<sitemapindex>\
                 <sitemap><loc>https://example.com/pages.xml</loc></sitemap>\
                 <sitemap><loc>https://example.com/posts.xml</loc></sitemap>\
                 </sitemapindex>",
            ),
            (
                "https://example.com/pages.xml",
                "<urlset><url><loc>https://example.com/a</loc></url></urlset>",
            ),
            (
                "https://example.com/posts.xml",
                "<urlset><url><loc>https://example.com/b</loc></url></urlset>",
            ),
        ]);

        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 50).await;
        assert_eq!(urls.len(), 2);
    }

    #[tokio::test]
    async fn test_cross_site_urls_filtered() {
        let fetcher = fetcher_with(&[(
            "https://example.com/sitemap.xml",
            "<urlset>\
             <url><loc>https://example.com/keep</loc></url>\
             <url><loc>https://www.example.com/also-keep</loc></url>\
             <url><loc>https://blog.example.com/subdomain-ok</loc></url>\
             <url><loc>https://other.org/drop</loc></url>\
             </urlset>",
        )]);

        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 50).await;
        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|u| u.host_str() != Some("other.org")));
    }

    #[tokio::test]
    async fn test_max_urls_cap() {
        let body: String = (0..20)
            .map(|i| format!("<url><loc>https://example.com/p{}</loc></url>", i))
            .collect();
        let fetcher = fetcher_with(&[(
            "https://example.com/sitemap.xml",
            &format!("<urlset>{}</urlset>", body),
        )]);

        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 5).await;
        assert_eq!(urls.len(), 5);
    }

    #[tokio::test]
    async fn test_absent_sitemap_yields_empty() {
        let fetcher = fetcher_with(&[]);
        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 50).await;
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_sitemap_yields_empty() {
        let fetcher = fetcher_with(&[(
            "https://example.com/sitemap.xml",
            "this is not xml at all {{{",
        )]);
        let urls = resolve_sitemap(&fetcher, &base(), "example.com", 50).await;
        assert!(urls.is_empty());
    }
}
