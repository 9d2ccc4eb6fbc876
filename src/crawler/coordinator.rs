//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Enumerating member URLs for each configured listing
//! - Deduplicating member URLs within a listing
//! - Pacing requests with the mandatory inter-request delay
//! - Collecting extracted records in discovery order
//! - Responding to cancellation between page fetches
//! - Releasing the fetcher on every exit path

use crate::config::Config;
use crate::crawler::CrawlResult;
use crate::extract::{ListingExtractor, PageExtractor};
use crate::fetch::Fetcher;
use crate::output::CrawlStats;
use crate::ConfigError;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Main crawler coordinator structure
///
/// Owns the single fetcher for the whole run. Listings are processed
/// sequentially, and pages within a listing are processed sequentially, so
/// the fetcher's navigation state is never shared.
pub struct Coordinator<F: Fetcher> {
    fetcher: F,
    listing_extractor: ListingExtractor,
    page_extractor: PageExtractor,
    targets: Vec<crate::config::ListingEntry>,
    request_delay: Duration,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `fetcher` - The page-loading session to drive
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ConfigError)` - A configured selector failed to compile
    pub fn new(config: &Config, fetcher: F) -> Result<Self, ConfigError> {
        let selectors = Arc::new(config.selectors.compile()?);

        Ok(Self {
            fetcher,
            listing_extractor: ListingExtractor::new(selectors.clone(), config.crawler.clone()),
            page_extractor: PageExtractor::new(selectors, config.crawler.clone()),
            targets: config.listing.clone(),
            request_delay: config.crawler.request_delay(),
        })
    }

    /// Runs the full crawl across every configured listing
    ///
    /// Returns one record collection per listing, keyed by the listing's
    /// logical name, in configuration order. No listing failure is fatal to
    /// another listing; failed pages are logged and absent from the result.
    ///
    /// Cancellation is honored between page fetches and between listings,
    /// never mid-wait. The fetcher is closed before returning on every path.
    pub async fn run(&mut self, cancel: &CancellationToken) -> IndexMap<String, CrawlResult> {
        let start = Instant::now();
        let mut stats = CrawlStats::new();
        let mut results = IndexMap::new();

        let targets = self.targets.clone();
        for target in targets {
            if cancel.is_cancelled() {
                tracing::warn!("Crawl cancelled before listing '{}'", target.name);
                break;
            }

            tracing::info!("Crawling listing '{}' from {}", target.name, target.url);
            let records = self.crawl_listing(&target, cancel, &mut stats).await;
            tracing::info!(
                "Listing '{}' produced {} records",
                target.name,
                records.len()
            );

            results.insert(target.name.clone(), records);
            stats.listings_crawled += 1;
        }

        stats.duration = start.elapsed();

        // Release the navigation session; a close failure loses no data
        if let Err(e) = self.fetcher.close().await {
            tracing::warn!("Failed to close fetcher: {}", e);
        }

        stats.log_summary();
        results
    }

    /// Crawls a single listing into an ordered record collection
    ///
    /// Member URLs are visited in document order; a URL repeated within the
    /// listing is extracted only on its first occurrence. The inter-request
    /// delay is a mandatory pause between successive page fetches, bounding
    /// the request rate against the source site.
    async fn crawl_listing(
        &mut self,
        target: &crate::config::ListingEntry,
        cancel: &CancellationToken,
        stats: &mut CrawlStats,
    ) -> CrawlResult {
        let member_urls = self
            .listing_extractor
            .list_members(&mut self.fetcher, &target.url)
            .await;
        stats.urls_discovered += member_urls.len() as u64;

        let mut visited: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for url in member_urls {
            if cancel.is_cancelled() {
                tracing::warn!("Crawl cancelled during listing '{}'", target.name);
                break;
            }

            if !visited.insert(url.clone()) {
                tracing::debug!("Skipping already visited URL: {}", url);
                continue;
            }

            tracing::info!("Scraping: {}", url);
            stats.urls_visited += 1;

            match self.page_extractor.extract(&mut self.fetcher, &url).await {
                Some(record) => {
                    records.push(record);
                    stats.records_extracted += 1;
                }
                None => {
                    stats.soft_failures += 1;
                }
            }

            tokio::time::sleep(self.request_delay).await;
        }

        records
    }

    /// Consumes the coordinator, returning the fetcher
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }
}
