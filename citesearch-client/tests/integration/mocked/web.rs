//! Web search tests against a mocked DuckDuckGo HTML endpoint

use citesearch_client::pubmed::{RecencyClause, free_text_query};
use citesearch_client::{
    DuckDuckGoClient, ErrorCategory, WebSearch, WebSearchConfig, take_results,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn results_page(count: usize) -> String {
    let results: String = (1..=count)
        .map(|i| {
            format!(
                r#"<div class="result results_links results_links_deep web-result">
  <div class="links_main links_deep result__body">
    <h2 class="result__title">
      <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fstudy%2F{i}&amp;rut=deadbeef">Study {i}</a>
    </h2>
    <a class="result__snippet" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fstudy%2F{i}">snippet {i}</a>
  </div>
</div>"#
            )
        })
        .collect();

    format!("<!DOCTYPE html><html><body><div id=\"links\">{results}</div></body></html>")
}

fn create_client(mock_server: &MockServer) -> DuckDuckGoClient {
    DuckDuckGoClient::with_config(WebSearchConfig::new().with_base_url(mock_server.uri()))
}

#[tokio::test]
async fn test_twelve_results_truncated_to_five() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "artificial intelligence in healthcare (2023 OR 2024)"))
        .and(query_param("kl", "us-en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(12)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let query = free_text_query(
        "artificial intelligence in healthcare",
        Some(&RecencyClause::years([2023, 2024])),
    );

    let urls = take_results(client.search(query.as_str()), 5).await.unwrap();

    assert_eq!(
        urls,
        vec![
            "https://example.org/study/1",
            "https://example.org/study/2",
            "https://example.org/study/3",
            "https://example.org/study/4",
            "https://example.org/study/5",
        ]
    );
}

#[tokio::test]
async fn test_no_results_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(0)))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let urls = take_results(client.search("qwertyuiop"), 5).await.unwrap();
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_blank_query_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = take_results(client.search(" "), 5).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidQuery);
}

#[tokio::test]
async fn test_http_error_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = take_results(client.search("anything"), 5).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Transport);
}
