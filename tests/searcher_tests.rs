mod common;

use chatbridge::extractor::GoogleResultExtractor;
use chatbridge::searcher::{SearchProvider, WebSearcher};
use httpmock::prelude::*;

use common::{CAPTCHA_PAGE, RESULTS_PAGE};

fn searcher_for(search_url: String) -> WebSearcher {
    WebSearcher::new(
        reqwest::Client::new(),
        search_url,
        Box::new(GoogleResultExtractor::default()),
    )
}

#[tokio::test]
async fn test_search_returns_extracted_results() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "rust language")
                .header_exists("user-agent")
                .header("referer", "https://www.google.com/");
            then.status(200)
                .header("content-type", "text/html; charset=UTF-8")
                .body(RESULTS_PAGE);
        })
        .await;

    let response = searcher_for(server.url("/search"))
        .search("rust language", false)
        .await;

    page.assert_async().await;
    assert!((1..=5).contains(&response.len()));
    for result in &response.results {
        assert!(!result.url.is_empty());
        assert!(!result.url.contains("google.com"));
    }
}

#[tokio::test]
async fn test_deep_flag_does_not_change_results() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(RESULTS_PAGE);
        })
        .await;

    let searcher = searcher_for(server.url("/search"));
    let shallow = searcher.search("rust", false).await;
    let deep = searcher.search("rust", true).await;
    assert_eq!(shallow, deep);
}

#[tokio::test]
async fn test_empty_query_skips_network() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(RESULTS_PAGE);
        })
        .await;

    let searcher = searcher_for(server.url("/search"));
    assert!(searcher.search("", false).await.is_empty());
    assert!(searcher.search("   ", true).await.is_empty());
    page.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_error_status_yields_no_results() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(429).body("Too Many Requests");
        })
        .await;

    let searcher = searcher_for(server.url("/search"));
    let err = searcher.try_search("rust").await.unwrap_err();
    assert_eq!(err.kind(), "upstream_status");
    assert!(searcher.search("rust", false).await.is_empty());
}

#[tokio::test]
async fn test_unextractable_page_points_at_search_url() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).body(CAPTCHA_PAGE);
        })
        .await;

    let searcher = searcher_for(server.url("/search"));
    let response = searcher.search("rust async", false).await;

    assert_eq!(response.len(), 1);
    let placeholder = &response.results[0];
    assert_eq!(placeholder.title, "Search Results");
    assert_eq!(placeholder.url, server.url("/search?q=rust+async"));
    assert!(placeholder.snippet.starts_with("No detailed results could be extracted."));
}

#[tokio::test]
async fn test_unreachable_engine_yields_error_result() {
    // Nothing listens on port 1.
    let searcher = searcher_for("http://127.0.0.1:1/search".to_string());

    let err = searcher.try_search("rust").await.unwrap_err();
    assert_eq!(err.kind(), "upstream_unavailable");

    let response = searcher.search("rust", false).await;
    assert_eq!(response.len(), 1);
    let result = &response.results[0];
    assert_eq!(result.title, "Search Result");
    assert_eq!(result.url, "https://www.example.com");
    assert!(
        result
            .snippet
            .starts_with("Web search was attempted for: rust. However, an error occurred:")
    );
}
