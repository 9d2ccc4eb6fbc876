//! Queryable document snapshots
//!
//! Every element lookup in the crate goes through [`Document::try_locate`],
//! [`Document::locate_all`], or [`try_locate_in`]: an absent element is
//! always an `Option::None`, never a panic, so the soft/hard-failure policy
//! lives in the callers instead of being scattered across query sites.

use scraper::{ElementRef, Html, Selector};

/// A parsed snapshot of the fetcher's current page
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML string into a document snapshot
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns the first element matching the selector, if any
    pub fn try_locate(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Returns every element matching the selector, in document order
    pub fn locate_all(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }
}

/// Returns the first descendant of `scope` matching the selector, if any
pub fn try_locate_in<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Collects an element's text content, trimmed of surrounding whitespace
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
