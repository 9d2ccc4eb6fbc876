//! Bounded wait for page content
//!
//! Navigation alone does not guarantee the content of interest is queryable:
//! the engine behind the fetcher may populate the document after the initial
//! load. [`wait_for_element`] polls the current document until a selector
//! matches or the timeout elapses. A timeout is an outcome, not an error;
//! callers apply their own page-level failure policy.

use crate::fetch::Fetcher;
use scraper::Selector;
use std::time::{Duration, Instant};

/// Result of waiting for an element to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The element appeared within the timeout
    Ready,

    /// The timeout elapsed without the element appearing
    TimedOut,
}

impl WaitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Polls the fetcher's current document until `selector` matches or
/// `timeout` elapses
///
/// The predicate is evaluated at least once, even with a zero timeout. The
/// poll interval is clamped to the remaining time so the wait never
/// overshoots the deadline by more than one document query.
///
/// # Arguments
///
/// * `fetcher` - The fetcher whose current document is polled
/// * `selector` - The element being waited for
/// * `timeout` - Upper bound on the total wait
/// * `poll_interval` - Pause between document queries
pub async fn wait_for_element<F: Fetcher>(
    fetcher: &F,
    selector: &Selector,
    timeout: Duration,
    poll_interval: Duration,
) -> WaitOutcome {
    let deadline = Instant::now() + timeout;

    loop {
        let found = fetcher
            .document()
            .map(|doc| doc.try_locate(selector).is_some())
            .unwrap_or(false);

        if found {
            return WaitOutcome::Ready;
        }

        let now = Instant::now();
        if now >= deadline {
            return WaitOutcome::TimedOut;
        }

        tokio::time::sleep(poll_interval.min(deadline - now)).await;
    }
}
