use crate::ConfigError;
use scraper::Selector;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Quarry
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub listing: Vec<ListingEntry>,
}

/// Crawler timing configuration
///
/// All durations are configurable so tests can shrink them to near-zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum time to wait for a page's content to become available (milliseconds)
    #[serde(rename = "load-timeout-ms")]
    pub load_timeout_ms: u64,

    /// Interval between document polls while waiting for content (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Mandatory pause between successive page fetches within a listing (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Extra attempts after a navigation error or load timeout
    #[serde(rename = "load-retries")]
    pub load_retries: u32,

    /// Pause before each retry attempt (milliseconds), distinct from the
    /// inter-request delay
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: 10_000,
            poll_interval_ms: 250,
            request_delay_ms: 2_000,
            load_retries: 1,
            retry_backoff_ms: 5_000,
        }
    }
}

impl CrawlerConfig {
    /// Load-wait timeout as a Duration
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// Document poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Inter-request delay as a Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Retry backoff as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// CSS selectors for locating page elements
///
/// The defaults target MediaWiki markup: the page heading, the rendered
/// article body, the infobox table, and the generated category link list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Primary page title element
    pub title: String,

    /// Main content container (mandatory on member pages)
    pub content: String,

    /// Optional attribute table
    pub infobox: String,

    /// Row element within the infobox
    #[serde(rename = "infobox-row")]
    pub infobox_row: String,

    /// Key cell within a row
    #[serde(rename = "row-key")]
    pub row_key: String,

    /// Value cell within a row
    #[serde(rename = "row-value")]
    pub row_value: String,

    /// Member page links under the listing's generated-links container
    #[serde(rename = "member-links")]
    pub member_links: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: ".mw-page-title-main".to_string(),
            content: ".mw-parser-output".to_string(),
            infobox: ".infobox".to_string(),
            infobox_row: "tr".to_string(),
            row_key: "th".to_string(),
            row_value: "td".to_string(),
            member_links: "div.mw-category-generated a".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Compiles every selector string into a `scraper::Selector`
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector string failed to parse
    pub fn compile(&self) -> Result<Selectors, ConfigError> {
        Ok(Selectors {
            title: compile_selector(&self.title)?,
            content: compile_selector(&self.content)?,
            infobox: compile_selector(&self.infobox)?,
            infobox_row: compile_selector(&self.infobox_row)?,
            row_key: compile_selector(&self.row_key)?,
            row_value: compile_selector(&self.row_value)?,
            member_links: compile_selector(&self.member_links)?,
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{}", e),
    })
}

/// Compiled form of [`SelectorConfig`], ready for document queries
#[derive(Debug, Clone)]
pub struct Selectors {
    pub title: Selector,
    pub content: Selector,
    pub infobox: Selector,
    pub infobox_row: Selector,
    pub row_key: Selector,
    pub row_value: Selector,
    pub member_links: Selector,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the per-listing CSV and JSON files
    pub directory: String,
}

/// A category listing to crawl: a logical name and the listing page URL
///
/// The name keys the crawl result and prefixes the output filenames.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
}
