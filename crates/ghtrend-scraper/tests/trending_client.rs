//! Integration tests for `TrendingClient` against a wiremock server.
//!
//! No real network traffic is made; each test mounts the responses it needs
//! on a fresh `MockServer`.

use chrono::NaiveDate;
use ghtrend_core::Timeframe;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ghtrend_scraper::{ScraperError, TrendingClient};

/// 5-second timeout, no retries.
fn test_client(server: &MockServer) -> TrendingClient {
    TrendingClient::new(&format!("{}/trending", server.uri()), 5, "ghtrend-test/0.1", 0, 0)
        .expect("failed to build test TrendingClient")
}

fn test_client_with_retries(server: &MockServer, max_retries: u32) -> TrendingClient {
    TrendingClient::new(
        &format!("{}/trending", server.uri()),
        5,
        "ghtrend-test/0.1",
        max_retries,
        0,
    )
    .expect("failed to build test TrendingClient")
}

fn trending_page(names: &[&str]) -> String {
    let articles: String = names
        .iter()
        .map(|name| {
            format!(
                r#"<article class="Box-row">
                  <h2 class="h3 lh-condensed"><a href="/{name}">{name}</a></h2>
                  <p class="col-9 color-fg-muted my-1 pr-4">About {name}</p>
                  <a href="/{name}/stargazers"><svg class="octicon"></svg> 2,048</a>
                  <a href="/{name}/forks"><svg class="octicon"></svg> 64</a>
                  <span>100 stars today</span>
                </article>"#
            )
        })
        .collect();
    format!("<html><body>{articles}</body></html>")
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn fetch_snapshot_parses_page_for_requested_timeframe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .and(query_param("since", "weekly"))
        .and(header("accept", "text/html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(trending_page(&["a/one", "b/two"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let snapshot = client
        .fetch_snapshot(Timeframe::Weekly, date())
        .await
        .expect("expected snapshot");

    assert_eq!(snapshot.timeframe, Timeframe::Weekly);
    assert_eq!(snapshot.date, date());
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.repos[0].name, "a/one");
    assert_eq!(snapshot.repos[0].total_stars, 2_048);
    assert_eq!(snapshot.repos[1].rank, 2);
    assert_eq!(snapshot.repos[1].description, "About b/two");
}

#[tokio::test]
async fn fetch_snapshot_of_empty_page_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let snapshot = test_client(&server)
        .fetch_snapshot(Timeframe::Daily, date())
        .await
        .expect("empty page should still produce a snapshot");

    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn duplicate_repositories_are_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(trending_page(&["a/one", "a/one"])),
        )
        .mount(&server)
        .await;

    let result = test_client(&server)
        .fetch_snapshot(Timeframe::Daily, date())
        .await;

    assert!(
        matches!(result, Err(ScraperError::Malformed(_))),
        "expected Malformed, got: {result:?}"
    );
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 3)
        .fetch_page(Timeframe::Daily)
        .await;

    assert!(
        matches!(result, Err(ScraperError::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_page(Timeframe::Monthly).await;

    match result {
        Err(ScraperError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, 30),
        other => panic!("expected ScraperError::RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trending_page(&["x/y"])))
        .expect(1)
        .mount(&server)
        .await;

    let html = test_client_with_retries(&server, 3)
        .fetch_page(Timeframe::Daily)
        .await
        .expect("expected success after retries");

    assert!(html.contains("x/y"));
}

#[tokio::test]
async fn client_error_status_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 3)
        .fetch_page(Timeframe::Daily)
        .await;

    assert!(
        matches!(
            result,
            Err(ScraperError::UnexpectedStatus { status: 403, .. })
        ),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}
