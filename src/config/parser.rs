use crate::config::types::ScanConfig;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses an audit profile from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(ScanConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use seoscan::config::load_config;
///
/// let config = load_config(Path::new("seoscan.toml")).unwrap();
/// println!("Page budget: {}", config.crawl.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: ScanConfig = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}
