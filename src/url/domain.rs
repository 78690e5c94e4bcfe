use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL, lowercased and with any
/// leading www. prefix removed, so that www and bare-domain forms compare
/// equal.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain/host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use seoscan::url::extract_domain;
///
/// let url = Url::parse("https://WWW.Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| {
        let host = h.to_lowercase();
        host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
    })
}

/// Checks whether a candidate domain belongs to the same site as a base domain
///
/// The www prefix is ignored on both sides, and subdomains of the base domain
/// are accepted:
///
/// - "example.com" matches "example.com" and "www.example.com"
/// - "blog.example.com" matches base "example.com"
/// - "example.org" does not match base "example.com"
///
/// # Arguments
///
/// * `candidate` - The domain to classify
/// * `base` - The base domain of the site being crawled
pub fn same_site(candidate: &str, base: &str) -> bool {
    let candidate = candidate
        .to_lowercase()
        .trim_start_matches("www.")
        .to_string();
    let base = base.to_lowercase().trim_start_matches("www.").to_string();

    candidate == base || candidate.ends_with(&format!(".{}", base))
}
