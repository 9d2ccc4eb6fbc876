//! Crawl statistics
//!
//! Counters accumulated over a crawl run and logged as a summary when the
//! run finishes.

use std::time::Duration;

/// Summary counters for a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// Listings processed to completion (or cancellation)
    pub listings_crawled: u64,

    /// Member URLs discovered across all listings, duplicates included
    pub urls_discovered: u64,

    /// Member URLs actually fetched (after deduplication)
    pub urls_visited: u64,

    /// Records successfully extracted
    pub records_extracted: u64,

    /// Pages that yielded no record (load timeouts, navigation errors,
    /// missing content containers)
    pub soft_failures: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl CrawlStats {
    /// Creates empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of visited pages that produced a record, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.urls_visited == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / self.urls_visited as f64) * 100.0
    }

    /// Logs a one-shot summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Crawl finished: {} listings, {} URLs discovered, {} visited, {} records, {} soft failures ({:.1}% success) in {:.2?}",
            self.listings_crawled,
            self.urls_discovered,
            self.urls_visited,
            self.records_extracted,
            self.soft_failures,
            self.success_rate(),
            self.duration
        );
    }
}
