//! Quarry main entry point
//!
//! This is the command-line interface for the Quarry wiki category scraper.

use clap::Parser;
use quarry::config::{load_config_with_hash, Config};
use quarry::crawler::crawl;
use quarry::output::write_outputs;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Quarry: a patient wiki category scraper
///
/// Quarry visits configured category listing pages, extracts a structured
/// record from every member page at a bounded request rate, and writes one
/// CSV and one JSON file per category.
#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(version = "1.0.0")]
#[command(about = "A patient wiki category scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quarry=info,warn"),
            1 => EnvFilter::new("quarry=debug,info"),
            2 => EnvFilter::new("quarry=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Quarry Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Load timeout: {}ms", config.crawler.load_timeout_ms);
    println!("  Poll interval: {}ms", config.crawler.poll_interval_ms);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Load retries: {}", config.crawler.load_retries);
    println!("  Retry backoff: {}ms", config.crawler.retry_backoff_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSelectors:");
    println!("  Title: {}", config.selectors.title);
    println!("  Content: {}", config.selectors.content);
    println!("  Infobox: {}", config.selectors.infobox);
    println!("  Member links: {}", config.selectors.member_links);

    println!("\nOutput directory: {}", config.output.directory);

    println!("\nListings ({}):", config.listing.len());
    for entry in &config.listing {
        println!("  - {} -> {}", entry.name, entry.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} listings", config.listing.len());
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // Ctrl-C stops the crawl between page fetches; records already
    // extracted are still written out
    let interrupt_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            interrupt_token.cancel();
        }
    });

    let results = crawl(&config, &cancel).await?;

    let directory = Path::new(&config.output.directory);
    std::fs::create_dir_all(directory)?;

    for (name, records) in &results {
        let (csv_path, json_path) = write_outputs(name, records, directory)?;
        tracing::info!(
            "Saved {} entries to {} and {}",
            records.len(),
            csv_path.display(),
            json_path.display()
        );
    }

    Ok(())
}
