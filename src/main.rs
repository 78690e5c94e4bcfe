//! Seoscan main entry point
//!
//! This is the command-line interface for the seoscan site audit engine.

use anyhow::Context;
use clap::Parser;
use seoscan::config::{load_config, ReportFormat, ScanConfig};
use seoscan::report::{format_markdown_report, render_json, write_markdown_report};
use seoscan::{aggregate, analyze_page, CrawlController, HttpFetcher, ScanError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Seoscan: a site-wide SEO audit engine
///
/// Seoscan crawls one website from a start URL, seeded from its sitemap and
/// bounded by a page budget, analyzes every fetched page against a fixed set
/// of SEO checks, and aggregates the results into a prioritized site report.
#[derive(Parser, Debug)]
#[command(name = "seoscan")]
#[command(version)]
#[command(about = "A site-wide SEO audit engine", long_about = None)]
struct Cli {
    /// Start URL of the site to audit
    #[arg(value_name = "URL")]
    url: String,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to crawl (overrides config)
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Concurrent fetches per batch (overrides config)
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Politeness delay between batches in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Per-fetch timeout in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Ignore robots.txt disallow rules
    #[arg(long)]
    no_robots: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, then apply CLI overrides on top
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => ScanConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    run_audit(&cli.url, config, cli.quiet)
        .await
        .context("audit failed")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seoscan=info,warn"),
            1 => EnvFilter::new("seoscan=debug,info"),
            2 => EnvFilter::new("seoscan=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies CLI flag overrides onto the loaded configuration
fn apply_overrides(config: &mut ScanConfig, cli: &Cli) {
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawl.concurrency = concurrency;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawl.delay_ms = delay_ms;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.crawl.timeout_ms = timeout_ms;
    }
    if cli.no_robots {
        config.crawl.respect_robots_txt = false;
    }
    if let Some(output) = &cli.output {
        config.output.report_path = Some(output.display().to_string());
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
}

/// Runs the full audit pipeline: crawl, analyze, aggregate, render
async fn run_audit(url: &str, config: ScanConfig, quiet: bool) -> Result<(), ScanError> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.crawl.timeout_ms)?;

    let mut controller = CrawlController::new(fetcher, config.crawl.clone());
    if !quiet {
        controller = controller.with_progress(Box::new(|crawled, budget| {
            eprintln!("Crawled {}/{} pages", crawled, budget);
        }));
    }

    let crawl_result = controller.crawl(url).await?;

    if crawl_result.crawled_pages == 0 {
        return Err(ScanError::NothingCrawled {
            url: url.to_string(),
        });
    }

    tracing::info!("Analyzing {} pages", crawl_result.crawled_pages);
    let analyses = crawl_result.pages.iter().map(analyze_page).collect();

    let report = aggregate(analyses, &crawl_result);
    tracing::info!("Overall score: {}/100", report.overall_score);

    match (&config.output.report_path, config.output.format) {
        (Some(path), ReportFormat::Markdown) => {
            write_markdown_report(&report, Path::new(path))?;
            if !quiet {
                println!("Report written to: {}", path);
            }
        }
        (Some(path), ReportFormat::Json) => {
            std::fs::write(path, render_json(&report)?)?;
            if !quiet {
                println!("Report written to: {}", path);
            }
        }
        (None, ReportFormat::Markdown) => print!("{}", format_markdown_report(&report)),
        (None, ReportFormat::Json) => println!("{}", render_json(&report)?),
    }

    Ok(())
}
