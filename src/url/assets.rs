/// File extensions that identify non-page assets
///
/// URLs ending in one of these are never enqueued by the frontier: images,
/// stylesheets, scripts, fonts, archives, media, and structured-data files
/// are not HTML pages and have nothing for the analyzer to check.
const ASSET_EXTENSIONS: &[&str] = &[
    // Images
    "jpg", "jpeg", "png", "gif", "webp", "svg", "ico", "bmp", "avif",
    // Stylesheets and scripts
    "css", "js", "mjs", "map",
    // Fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // Archives
    "zip", "gz", "tar", "rar", "7z", "bz2",
    // Media
    "mp3", "mp4", "webm", "ogg", "wav", "avi", "mov",
    // Documents and structured data
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "json", "xml", "rss",
    "atom", "csv", "txt",
];

/// Checks whether a URL path points at a non-page asset
///
/// The check is on the final path segment's extension, case-insensitively.
/// Query strings must be stripped by the caller (the frontier operates on
/// normalized URLs, whose path carries no query).
///
/// # Examples
///
/// ```
/// use seoscan::url::is_asset_path;
///
/// assert!(is_asset_path("/static/logo.PNG"));
/// assert!(is_asset_path("/feed.xml"));
/// assert!(!is_asset_path("/about"));
/// assert!(!is_asset_path("/blog/post.html"));
/// ```
pub fn is_asset_path(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or(path);

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_lowercase();
            ASSET_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}
