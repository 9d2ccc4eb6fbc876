//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full crawl-and-write cycle end-to-end with the real HTTP fetcher.

use quarry::config::{
    Config, CrawlerConfig, ListingEntry, OutputConfig, SelectorConfig, UserAgentConfig,
};
use quarry::crawler::Coordinator;
use quarry::fetch::HttpFetcher;
use quarry::Record;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the given listings
fn create_test_config(listings: Vec<ListingEntry>, out_dir: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            load_timeout_ms: 200,
            poll_interval_ms: 5,
            request_delay_ms: 10, // Very short for testing
            load_retries: 0,
            retry_backoff_ms: 10,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestScraper".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        selectors: SelectorConfig::default(),
        output: OutputConfig {
            directory: out_dir.to_string(),
        },
        listing: listings,
    }
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html")
}

fn listing_body(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|p| format!(r#"<a href="{}">{}</a>"#, p, p))
        .collect();
    format!(
        r#"<html><body><div class="mw-category-generated">{}</div></body></html>"#,
        anchors
    )
}

fn member_body(title: &str, content: &str, rows: &[(&str, &str)]) -> String {
    let table: String = rows
        .iter()
        .map(|(key, value)| format!("<tr><th>{}</th><td>{}</td></tr>", key, value))
        .collect();
    format!(
        r#"<html><body>
        <h1><span class="mw-page-title-main">{}</span></h1>
        <div class="mw-parser-output">{}</div>
        <table class="infobox">{}</table>
        </body></html>"#,
        title, content, table
    )
}

#[tokio::test]
async fn test_full_crawl_writes_both_outputs() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/w/Category:Blocks"))
        .respond_with(html_response(listing_body(&["/w/Stone", "/w/Dirt"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Stone"))
        .respond_with(html_response(member_body(
            "Stone",
            "A block.",
            &[("Stackable", "Yes")],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Dirt"))
        .respond_with(html_response(member_body("Dirt", "Another block.", &[])))
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![ListingEntry {
            name: "blocks".to_string(),
            url: format!("{}/w/Category:Blocks", base_url),
        }],
        out_dir.path().to_str().unwrap(),
    );

    // Run the crawl
    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    let records = &results["blocks"];
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Stone");
    assert_eq!(records[0].infobox["Stackable"], "Yes");
    assert_eq!(records[1].title, "Dirt");

    // Write and read back both formats
    let (csv_path, json_path) =
        quarry::output::write_outputs("blocks", records, out_dir.path()).expect("Write failed");

    let csv_content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv_content.starts_with("Title,Content,Infobox"));

    let json_content = std::fs::read_to_string(&json_path).unwrap();
    let decoded: Vec<Record> = serde_json::from_str(&json_content).unwrap();
    assert_eq!(&decoded, records);
}

#[tokio::test]
async fn test_unloadable_member_page_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/w/Category:Blocks"))
        .respond_with(html_response(listing_body(&["/w/Stone", "/w/Broken"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Stone"))
        .respond_with(html_response(member_body("Stone", "A block.", &[])))
        .mount(&mock_server)
        .await;

    // The broken page loads but never shows a title element
    Mock::given(method("GET"))
        .and(path("/w/Broken"))
        .respond_with(html_response(
            "<html><body><p>still loading</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![ListingEntry {
            name: "blocks".to_string(),
            url: format!("{}/w/Category:Blocks", base_url),
        }],
        out_dir.path().to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    let records = &results["blocks"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Stone");
}

#[tokio::test]
async fn test_member_page_http_error_is_soft() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/w/Category:Blocks"))
        .respond_with(html_response(listing_body(&["/w/Gone", "/w/Stone"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Stone"))
        .respond_with(html_response(member_body("Stone", "A block.", &[])))
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![ListingEntry {
            name: "blocks".to_string(),
            url: format!("{}/w/Category:Blocks", base_url),
        }],
        out_dir.path().to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    let records = &results["blocks"];
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Stone");
}

#[tokio::test]
async fn test_unreachable_listing_yields_empty_result() {
    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![ListingEntry {
            name: "blocks".to_string(),
            // Nothing is listening here
            url: "http://127.0.0.1:1/w/Category:Blocks".to_string(),
        }],
        out_dir.path().to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    assert!(results["blocks"].is_empty());
}

#[tokio::test]
async fn test_duplicate_listing_links_fetch_each_page_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/w/Category:Blocks"))
        .respond_with(html_response(listing_body(&[
            "/w/Stone", "/w/Dirt", "/w/Stone",
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Stone"))
        .respond_with(html_response(member_body("Stone", "A block.", &[])))
        .expect(1) // Dedup must fetch this exactly once
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Dirt"))
        .respond_with(html_response(member_body("Dirt", "Another block.", &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![ListingEntry {
            name: "blocks".to_string(),
            url: format!("{}/w/Category:Blocks", base_url),
        }],
        out_dir.path().to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    assert_eq!(results["blocks"].len(), 2);
    // Wiremock verifies the expect(1) counts when the server drops
}

#[tokio::test]
async fn test_multiple_listings_are_independent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/w/Category:Blocks"))
        .respond_with(html_response(listing_body(&["/w/Stone"])))
        .mount(&mock_server)
        .await;

    // The items listing serves a page with no member links at all
    Mock::given(method("GET"))
        .and(path("/w/Category:Items"))
        .respond_with(html_response(
            "<html><body><p>empty category</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/w/Stone"))
        .respond_with(html_response(member_body("Stone", "A block.", &[])))
        .mount(&mock_server)
        .await;

    let out_dir = TempDir::new().unwrap();
    let config = create_test_config(
        vec![
            ListingEntry {
                name: "items".to_string(),
                url: format!("{}/w/Category:Items", base_url),
            },
            ListingEntry {
                name: "blocks".to_string(),
                url: format!("{}/w/Category:Blocks", base_url),
            },
        ],
        out_dir.path().to_str().unwrap(),
    );

    let fetcher = HttpFetcher::new(&config.user_agent).expect("Failed to build fetcher");
    let mut coordinator = Coordinator::new(&config, fetcher).expect("Failed to create coordinator");
    let results = coordinator.run(&CancellationToken::new()).await;

    assert!(results["items"].is_empty());
    assert_eq!(results["blocks"].len(), 1);
}
