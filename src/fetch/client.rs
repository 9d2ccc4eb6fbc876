//! HTTP-backed fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with proper user agent strings
//! - Navigating to pages and holding the fetched body
//! - Error classification (timeout, connection, status, content type)

use crate::config::UserAgentConfig;
use crate::fetch::{Document, FetchError, Fetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use quarry::config::UserAgentConfig;
/// use quarry::fetch::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "Quarry".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by an HTTP client
///
/// Each navigation issues a GET request and holds the response body; the
/// document snapshot is parsed from the held body on demand. One instance
/// serves an entire crawl run.
pub struct HttpFetcher {
    client: Client,
    current: Option<String>,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the user agent configuration
    pub fn new(config: &UserAgentConfig) -> Result<Self, FetchError> {
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            current: None,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else if e.is_connect() {
                FetchError::Unreachable {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Check Content-Type
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        // A failed navigation must not leave the previous page queryable
        self.current = None;

        tracing::debug!("Navigating to {}", url);
        let body = self.get(url).await?;
        self.current = Some(body);
        Ok(())
    }

    fn document(&self) -> Option<Document> {
        self.current.as_deref().map(Document::parse)
    }

    async fn close(&mut self) -> Result<(), FetchError> {
        self.current = None;
        Ok(())
    }
}
