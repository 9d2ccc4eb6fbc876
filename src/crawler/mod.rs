//! Crawl orchestration
//!
//! This module contains the crawl loop that drives listing enumeration and
//! page extraction across a shared fetcher, with rate limiting,
//! deduplication, and cancellation.

mod coordinator;

pub use coordinator::Coordinator;

use crate::config::Config;
use crate::extract::Record;
use crate::fetch::HttpFetcher;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

/// Ordered records extracted from one listing, in URL discovery order
pub type CrawlResult = Vec<Record>;

/// Runs a complete crawl operation over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP fetcher from the user agent configuration
/// 2. Enumerate member URLs for every configured listing
/// 3. Extract a record from each member page, deduplicated and rate limited
/// 4. Return the records grouped by listing name
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `cancel` - Token checked between page fetches; cancelling stops the
///   crawl without losing records already extracted
///
/// # Returns
///
/// * `Ok(results)` - Records per listing name, in configuration order
/// * `Err(QuarryError)` - Client construction or selector compilation failed
pub async fn crawl(
    config: &Config,
    cancel: &CancellationToken,
) -> crate::Result<IndexMap<String, CrawlResult>> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let mut coordinator = Coordinator::new(config, fetcher)?;
    Ok(coordinator.run(cancel).await)
}
