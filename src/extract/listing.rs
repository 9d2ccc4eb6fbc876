//! Listing page extraction
//!
//! Enumerates member page URLs from a category listing. A listing that fails
//! to load produces an empty member list and a logged warning; the crawl
//! continues with zero members for that listing. No deduplication happens
//! here: pagination controls may legitimately repeat a URL, and the crawler
//! owns the visited set.

use crate::config::{CrawlerConfig, Selectors};
use crate::fetch::{wait_for_element, Fetcher, WaitOutcome};
use std::sync::Arc;
use url::Url;

/// Enumerates member page URLs from listing pages
pub struct ListingExtractor {
    selectors: Arc<Selectors>,
    timing: CrawlerConfig,
}

impl ListingExtractor {
    pub fn new(selectors: Arc<Selectors>, timing: CrawlerConfig) -> Self {
        Self { selectors, timing }
    }

    /// Navigates to a listing page and collects member URLs in document order
    ///
    /// Every failure path returns an empty list: navigation errors and
    /// member-link wait timeouts are listing-scoped soft failures. A listing
    /// that loads but contains no member links is logged separately from a
    /// timeout, though the caller-visible outcome is the same.
    pub async fn list_members<F: Fetcher>(&self, fetcher: &mut F, listing_url: &str) -> Vec<String> {
        let base = match Url::parse(listing_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid listing URL {}: {}", listing_url, e);
                return Vec::new();
            }
        };

        if let Err(e) = fetcher.navigate(listing_url).await {
            tracing::warn!("Failed to load listing {}: {}", listing_url, e);
            return Vec::new();
        }

        let outcome = wait_for_element(
            fetcher,
            &self.selectors.member_links,
            self.timing.load_timeout(),
            self.timing.poll_interval(),
        )
        .await;

        if outcome == WaitOutcome::TimedOut {
            tracing::warn!("Member links did not load on {}", listing_url);
            return Vec::new();
        }

        let document = match fetcher.document() {
            Some(document) => document,
            None => {
                tracing::warn!("No document available for listing {}", listing_url);
                return Vec::new();
            }
        };

        let urls: Vec<String> = document
            .locate_all(&self.selectors.member_links)
            .iter()
            .filter_map(|link| link.value().attr("href"))
            .filter_map(|href| resolve_link(href, &base))
            .collect();

        if urls.is_empty() {
            tracing::info!("No member links found on {}", listing_url);
        } else {
            tracing::debug!("Found {} member links on {}", urls.len(), listing_url);
        }

        urls
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - URLs that fail to resolve or are not HTTP(S)
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
