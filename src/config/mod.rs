//! Configuration module for seoscan
//!
//! This module handles loading, parsing, and validating TOML audit profiles.
//! Every option can also be supplied from the CLI; a config file is only a
//! convenience for repeated audits of the same site.
//!
//! # Example
//!
//! ```no_run
//! use seoscan::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("seoscan.toml")).unwrap();
//! println!("Page budget: {}", config.crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{CrawlOptions, OutputConfig, ReportFormat, ScanConfig, UserAgentConfig};
pub use validation::validate;
