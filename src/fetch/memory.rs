//! In-memory fetcher for tests and offline runs
//!
//! [`StaticFetcher`] serves documents from a URL-to-HTML map with no network
//! access. A page may be registered with a poll delay so the document only
//! becomes queryable after a number of [`Fetcher::document`] calls, which
//! simulates asynchronously populated content and exercises the wait loop.

use crate::fetch::{Document, FetchError, Fetcher};
use async_trait::async_trait;
use std::cell::Cell;
use std::collections::HashMap;

struct StaticPage {
    html: String,
    ready_after_polls: u32,
}

/// Fetcher serving pages from memory
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, StaticPage>,
    current: Option<String>,
    polls: Cell<u32>,
    navigations: Vec<String>,
    closed: bool,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page whose document is available immediately
    pub fn insert(&mut self, url: &str, html: &str) {
        self.insert_delayed(url, html, 0);
    }

    /// Registers a page whose document appears only after `ready_after_polls`
    /// document queries following a navigation
    pub fn insert_delayed(&mut self, url: &str, html: &str, ready_after_polls: u32) {
        self.pages.insert(
            url.to_string(),
            StaticPage {
                html: html.to_string(),
                ready_after_polls,
            },
        );
    }

    /// URLs navigated to, in order
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of navigations to the given URL
    pub fn navigation_count(&self, url: &str) -> usize {
        self.navigations.iter().filter(|u| *u == url).count()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        self.navigations.push(url.to_string());
        self.polls.set(0);

        if self.pages.contains_key(url) {
            self.current = Some(url.to_string());
            Ok(())
        } else {
            self.current = None;
            Err(FetchError::UnknownUrl {
                url: url.to_string(),
            })
        }
    }

    fn document(&self) -> Option<Document> {
        let url = self.current.as_ref()?;
        let page = self.pages.get(url)?;

        let poll = self.polls.get();
        self.polls.set(poll + 1);
        if poll < page.ready_after_polls {
            return None;
        }

        Some(Document::parse(&page.html))
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        self.closed = true;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[tokio::test]
    async fn test_navigate_to_registered_page() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert("https://wiki.test/w/Stone", "<html><h1>Stone</h1></html>");

        fetcher.navigate("https://wiki.test/w/Stone").await.unwrap();
        let doc = fetcher.document().unwrap();
        let h1 = Selector::parse("h1").unwrap();
        assert!(doc.try_locate(&h1).is_some());
    }

    #[tokio::test]
    async fn test_navigate_to_unknown_url_fails() {
        let mut fetcher = StaticFetcher::new();
        let result = fetcher.navigate("https://wiki.test/w/Missing").await;
        assert!(result.is_err());
        assert!(fetcher.document().is_none());
    }

    #[tokio::test]
    async fn test_failed_navigation_clears_previous_document() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert("https://wiki.test/w/Stone", "<html></html>");

        fetcher.navigate("https://wiki.test/w/Stone").await.unwrap();
        assert!(fetcher.document().is_some());

        let _ = fetcher.navigate("https://wiki.test/w/Missing").await;
        assert!(fetcher.document().is_none());
    }

    #[tokio::test]
    async fn test_delayed_page_appears_after_polls() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_delayed("https://wiki.test/w/Slow", "<html></html>", 2);

        fetcher.navigate("https://wiki.test/w/Slow").await.unwrap();
        assert!(fetcher.document().is_none());
        assert!(fetcher.document().is_none());
        assert!(fetcher.document().is_some());
    }

    #[tokio::test]
    async fn test_delay_resets_on_renavigation() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert_delayed("https://wiki.test/w/Slow", "<html></html>", 1);

        fetcher.navigate("https://wiki.test/w/Slow").await.unwrap();
        assert!(fetcher.document().is_none());
        assert!(fetcher.document().is_some());

        fetcher.navigate("https://wiki.test/w/Slow").await.unwrap();
        assert!(fetcher.document().is_none());
    }

    #[tokio::test]
    async fn test_navigation_counting() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert("https://wiki.test/w/Stone", "<html></html>");

        fetcher.navigate("https://wiki.test/w/Stone").await.unwrap();
        fetcher.navigate("https://wiki.test/w/Stone").await.unwrap();
        let _ = fetcher.navigate("https://wiki.test/w/Dirt").await;

        assert_eq!(fetcher.navigation_count("https://wiki.test/w/Stone"), 2);
        assert_eq!(fetcher.navigation_count("https://wiki.test/w/Dirt"), 1);
        assert_eq!(fetcher.navigations().len(), 3);
    }

    #[tokio::test]
    async fn test_close_drops_document() {
        let mut fetcher = StaticFetcher::new();
        fetcher.insert("https://wiki.test/w/Stone", "<html></html>");
        fetcher.navigate("https://wiki.test/w/Stone").await.unwrap();

        fetcher.close().await.unwrap();
        assert!(fetcher.is_closed());
        assert!(fetcher.document().is_none());
    }
}
