//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch/parse cycle end-to-end.

use ripple_spider::config::CrawlConfig;
use ripple_spider::crawler::{run_crawl, Coordinator};
use ripple_spider::{SpiderError, UrlError};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no delay between fetches
fn create_test_config(seed: &str, crawl_limit: u64, num_threads: u32) -> CrawlConfig {
    let mut config = CrawlConfig::default();
    config.crawler.starting_url = seed.to_string();
    config.crawler.crawl_limit = crawl_limit;
    config.crawler.num_threads = num_threads;
    config.crawler.crawl_delay = 0;
    config.http.client_label = "TestSpider 1.0".to_string();
    config.http.request_timeout = 5;
    config
}

fn html_page(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

fn no_triggers() -> mpsc::Receiver<()> {
    let (_tx, rx) = mpsc::channel(1);
    rx
}

#[tokio::test]
async fn test_limit_one_fetches_only_the_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestSpider 1.0"))
        .respond_with(html_page(format!(
            r#"<a href="{0}/page1">Page 1</a><a href="{0}/page2">Page 2</a>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page("Content 1".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page("Content 2".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 1, 1);
    let summary = tokio::time::timeout(Duration::from_secs(10), run_crawl(config, no_triggers()))
        .await
        .expect("crawl did not shut down")
        .expect("crawl failed to start");

    assert_eq!(summary.pages_crawled, 1);
    assert_eq!(summary.frontier_abandoned, 0);
}

#[tokio::test]
async fn test_multi_page_crawl_skips_relative_and_non_http_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<a href="{0}/a">A</a>
               <a href="{0}/b">B</a>
               <a href="/about">About</a>
               <a href="mailto:someone@example.com">Mail</a>
               <a href="ftp://files.example.com/pub">Files</a>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(format!(r#"<a href="{}/">Home</a>"#, base_url)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(format!(r#"<a href="{}/a">A</a>"#, base_url)))
        .mount(&mock_server)
        .await;

    // Only reachable through a relative href, which must never be followed.
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("About".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 3, 2);
    let summary = tokio::time::timeout(Duration::from_secs(10), run_crawl(config, no_triggers()))
        .await
        .expect("crawl did not shut down")
        .expect("crawl failed to start");

    assert_eq!(summary.pages_crawled, 3);
}

#[tokio::test]
async fn test_failed_pages_are_not_counted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<a href="{0}/missing">Gone</a><a href="{0}/broken">Broken</a><a href="{0}/ok">OK</a>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_page("Leaf".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 2, 1);
    let summary = tokio::time::timeout(Duration::from_secs(10), run_crawl(config, no_triggers()))
        .await
        .expect("crawl did not shut down")
        .expect("crawl failed to start");

    assert_eq!(summary.pages_crawled, 2);
}

#[tokio::test]
async fn test_zero_limit_stops_after_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(r#"<a href="{}/next">Next</a>"#, base_url)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page("Next".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 0, 1);
    let summary = tokio::time::timeout(Duration::from_secs(10), run_crawl(config, no_triggers()))
        .await
        .expect("crawl did not shut down")
        .expect("crawl failed to start");

    assert_eq!(summary.pages_crawled, 0);
}

#[tokio::test]
async fn test_coordinator_releases_every_parsed_response() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(html_page(format!(
            r#"<a href="{0}/x">X</a><a href="{0}/y">Y</a>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 5, 2);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let engine = coordinator.engine().clone();

    let summary = tokio::time::timeout(Duration::from_secs(10), coordinator.run(no_triggers()))
        .await
        .expect("crawl did not shut down");

    assert_eq!(summary.pages_crawled, 5);
    assert!(engine.shutdown().is_raised());
    assert_eq!(engine.open_responses().get(), summary.responses_abandoned);
}

#[tokio::test]
async fn test_malformed_seed_fails_before_crawling() {
    let config = create_test_config("not a url", 10, 1);
    let result = run_crawl(config, no_triggers()).await;

    assert!(matches!(result, Err(SpiderError::Url(UrlError::Relative(_)))));
}
