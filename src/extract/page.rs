//! Member page extraction
//!
//! Pulls a [`Record`] out of a loaded page with a locate-and-fallback
//! strategy. Failures are graded rather than raised:
//! - page never loads (navigation error or title wait timeout): soft
//!   failure, the page yields no record and the URL is logged
//! - content container missing after a successful title wait: hard
//!   page-scoped failure, no record, logged
//! - infobox missing: empty attribute map, not a failure
//! - infobox row missing a key or value cell: row skipped silently

use crate::config::{CrawlerConfig, Selectors};
use crate::extract::Record;
use crate::fetch::{element_text, try_locate_in, wait_for_element, Document, Fetcher, WaitOutcome};
use indexmap::IndexMap;
use std::sync::Arc;

enum LoadFailure {
    Navigation(String),
    TitleTimeout,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigation(message) => write!(f, "navigation failed: {}", message),
            Self::TitleTimeout => write!(f, "title element did not appear"),
        }
    }
}

/// Extracts structured records from member pages
pub struct PageExtractor {
    selectors: Arc<Selectors>,
    timing: CrawlerConfig,
}

impl PageExtractor {
    pub fn new(selectors: Arc<Selectors>, timing: CrawlerConfig) -> Self {
        Self { selectors, timing }
    }

    /// Navigates to a member page and extracts its record
    ///
    /// Returns `None` when the page yields no record; the reason has already
    /// been logged. Never returns an error: every failure here is page-scoped
    /// and must not abort the crawl.
    ///
    /// Navigation errors and title-wait timeouts are retried up to the
    /// configured `load-retries` with a backoff pause. The backoff is
    /// separate from the crawler's inter-request delay.
    pub async fn extract<F: Fetcher>(&self, fetcher: &mut F, url: &str) -> Option<Record> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.try_load(fetcher, url).await {
                None => break,
                Some(failure) => {
                    if attempts > self.timing.load_retries {
                        tracing::warn!("Failed to load page {}: {}", url, failure);
                        return None;
                    }
                    tracing::debug!(
                        "Retrying page {} after load failure ({}), attempt {} of {}",
                        url,
                        failure,
                        attempts + 1,
                        self.timing.load_retries + 1
                    );
                    tokio::time::sleep(self.timing.retry_backoff()).await;
                }
            }
        }

        let document = match fetcher.document() {
            Some(document) => document,
            None => {
                tracing::warn!("No document available for {} after load", url);
                return None;
            }
        };

        self.extract_loaded(&document, url)
    }

    /// Extracts a record from an already-loaded document
    ///
    /// The title element is assumed present (the load wait succeeded); a
    /// vanished title degrades to an empty string rather than a failure. A
    /// missing content container drops the page.
    pub fn extract_loaded(&self, document: &Document, url: &str) -> Option<Record> {
        let title = document
            .try_locate(&self.selectors.title)
            .map(element_text)
            .unwrap_or_default();

        let content = match document.try_locate(&self.selectors.content) {
            Some(element) => element_text(element),
            None => {
                tracing::warn!("Content container missing on {}, dropping page", url);
                return None;
            }
        };

        let infobox = self.extract_infobox(document);

        Some(Record {
            title,
            content,
            infobox,
        })
    }

    /// One navigation plus title wait; returns the failure, if any
    async fn try_load<F: Fetcher>(&self, fetcher: &mut F, url: &str) -> Option<LoadFailure> {
        if let Err(e) = fetcher.navigate(url).await {
            return Some(LoadFailure::Navigation(e.to_string()));
        }

        let outcome = wait_for_element(
            fetcher,
            &self.selectors.title,
            self.timing.load_timeout(),
            self.timing.poll_interval(),
        )
        .await;

        match outcome {
            WaitOutcome::Ready => None,
            WaitOutcome::TimedOut => Some(LoadFailure::TitleTimeout),
        }
    }

    /// Reads the optional attribute table
    ///
    /// An absent infobox yields an empty map. Rows are visited in document
    /// order; a row missing either cell is skipped. Duplicate keys take the
    /// last value while keeping their first position.
    fn extract_infobox(&self, document: &Document) -> IndexMap<String, String> {
        let mut attributes = IndexMap::new();

        let infobox = match document.try_locate(&self.selectors.infobox) {
            Some(element) => element,
            None => return attributes,
        };

        for row in infobox.select(&self.selectors.infobox_row) {
            let key = match try_locate_in(row, &self.selectors.row_key) {
                Some(cell) => element_text(cell),
                None => continue,
            };
            let value = match try_locate_in(row, &self.selectors.row_value) {
                Some(cell) => element_text(cell),
                None => continue,
            };
            attributes.insert(key, value);
        }

        attributes
    }
}
