//! DOM fact extraction
//!
//! Stateless extraction of the structured facts the SEO checks consume:
//! title, meta tags, canonical, heading counts, image alt coverage, word
//! count, and the absolute link list with internal/external classification.

use crate::url::{extract_domain, same_site};
use scraper::{Html, Selector};
use url::Url;

/// One link found on a page, resolved to an absolute URL
#[derive(Debug, Clone)]
pub struct PageLink {
    /// Absolute URL of the link target
    pub href: String,

    /// Whether the target is on the same site as the page it was found on
    pub is_internal: bool,
}

/// Structured facts extracted from one HTML document
#[derive(Debug, Clone, Default)]
pub struct PageFacts {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_robots: Option<String>,
    pub canonical: Option<String>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub image_count: usize,
    pub images_missing_alt: usize,
    pub word_count: usize,
    pub links: Vec<PageLink>,
}

/// Extracts structured facts from HTML
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` tags anywhere in the document.
///
/// **Exclude:** `javascript:`, `mailto:`, `tel:` and `data:` targets,
/// fragment-only anchors, links carrying the `download` attribute, and
/// anything that does not resolve to an HTTP(S) URL.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page's own URL, for resolving relative links and
///   classifying targets as internal or external
pub fn extract_facts(html: &str, base_url: &Url) -> PageFacts {
    let document = Html::parse_document(html);
    let base_domain = extract_domain(base_url).unwrap_or_default();

    let mut facts = PageFacts {
        title: select_text(&document, "title"),
        meta_description: select_attr(&document, "meta[name='description']", "content"),
        meta_robots: select_attr(&document, "meta[name='robots']", "content"),
        canonical: select_attr(&document, "link[rel='canonical']", "href"),
        ..Default::default()
    };

    if let Ok(selector) = Selector::parse("h1") {
        facts.h1_count = document.select(&selector).count();
    }
    if let Ok(selector) = Selector::parse("h2") {
        facts.h2_count = document.select(&selector).count();
    }

    if let Ok(selector) = Selector::parse("img") {
        for img in document.select(&selector) {
            facts.image_count += 1;
            let alt = img.value().attr("alt").map(str::trim).unwrap_or_default();
            if alt.is_empty() {
                facts.images_missing_alt += 1;
            }
        }
    }

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            facts.word_count = body
                .text()
                .flat_map(|t| t.split_whitespace())
                .count();
        }
    }

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    let is_internal = extract_domain(&absolute)
                        .map(|d| same_site(&d, &base_domain))
                        .unwrap_or(false);
                    facts.links.push(PageLink {
                        href: absolute.to_string(),
                        is_internal,
                    });
                }
            }
        }
    }

    facts
}

/// Returns the trimmed text content of the first element matching a selector
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the trimmed attribute value of the first element matching a selector
fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid URLs or non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
