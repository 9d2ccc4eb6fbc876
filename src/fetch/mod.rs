//! Page fetching capability
//!
//! This module defines the [`Fetcher`] trait, the single shared navigation
//! resource every other component works against, together with:
//! - [`Document`], a queryable snapshot of the current page
//! - [`HttpFetcher`], the reqwest-backed implementation
//! - [`StaticFetcher`], an in-memory implementation for tests and offline runs
//! - [`wait_for_element`], the bounded wait for content to become available

mod client;
mod document;
mod memory;
mod wait;

pub use client::{build_http_client, HttpFetcher};
pub use document::{element_text, try_locate_in, Document};
pub use memory::StaticFetcher;
pub use wait::{wait_for_element, WaitOutcome};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while navigating to a page
///
/// Callers treat every variant as a page-scoped soft failure: the page is
/// logged and skipped, the crawl continues.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Expected HTML for {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Unknown URL {url}")]
    UnknownUrl { url: String },
}

/// A navigable page-loading session
///
/// The fetcher is a mutable navigation context holding at most one loaded
/// page at a time. Access is strictly sequential: one component navigates,
/// waits, and queries before the next navigation happens. Implementations
/// must release any underlying session resources in [`close`](Fetcher::close),
/// which the coordinator calls on every exit path.
#[async_trait]
pub trait Fetcher {
    /// Loads the given URL, replacing the current document
    ///
    /// On error the current document is cleared; the previous page is not
    /// retained.
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError>;

    /// Returns a snapshot of the current document, if a page is loaded
    ///
    /// Returns `None` when no navigation has happened yet, the last
    /// navigation failed, or the page's content is not yet available.
    fn document(&self) -> Option<Document>;

    /// Releases the underlying session
    ///
    /// Idempotent; the fetcher holds no document afterwards.
    async fn close(&mut self) -> Result<(), FetchError>;
}
