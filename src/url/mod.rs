//! URL handling module for seoscan
//!
//! This module provides URL normalization, domain extraction, same-site
//! classification, and the asset-extension filter used by the crawl frontier.

mod assets;
mod domain;
mod normalize;

pub use assets::is_asset_path;
pub use domain::{extract_domain, same_site};
pub use normalize::normalize_url;
