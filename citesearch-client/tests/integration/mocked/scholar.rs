//! Semantic Scholar paging tests against a mocked Graph API

use citesearch_client::{
    ErrorCategory, ScholarConfig, ScholarlySearch, SemanticScholarClient, take_results,
};
use futures_util::StreamExt;
use tracing_test::traced_test;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paper(n: usize) -> serde_json::Value {
    serde_json::json!({
        "paperId": format!("p{n}"),
        "title": format!("Paper {n}"),
        "authors": [{"authorId": "1", "name": "A. Author"}],
        "venue": "JAMA",
        "year": 2020 + n,
        "url": format!("https://www.semanticscholar.org/paper/p{n}")
    })
}

fn page(offset: usize, size: usize, next: Option<usize>) -> serde_json::Value {
    let data: Vec<serde_json::Value> = (offset..offset + size).map(paper).collect();
    match next {
        Some(next) => serde_json::json!({"total": 100, "offset": offset, "next": next, "data": data}),
        None => serde_json::json!({"total": offset + size, "offset": offset, "data": data}),
    }
}

fn create_client(mock_server: &MockServer) -> SemanticScholarClient {
    SemanticScholarClient::with_config(
        ScholarConfig::new()
            .with_base_url(mock_server.uri())
            .with_page_size(2),
    )
}

#[tokio::test]
#[traced_test]
async fn test_pages_fetched_lazily() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .and(query_param("query", "statins elderly"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 2, Some(2))))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 2, Some(4))))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Never reached: three records fit in the first two pages
    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .and(query_param("offset", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(4, 2, None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let records = take_results(client.search("statins elderly"), 3)
        .await
        .unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Paper 0", "Paper 1", "Paper 2"]);
    assert_eq!(records[0].author, "A. Author");
    assert_eq!(records[0].journal, "JAMA");
    assert_eq!(records[0].year, "2020");
    assert_eq!(
        records[2].pub_url,
        "https://www.semanticscholar.org/paper/p2"
    );
}

#[tokio::test]
async fn test_stream_ends_without_next() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 2, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let records = take_results(client.search("rare disease"), 10).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_api_key_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .and(header("x-api-key", "s2-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 1, None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SemanticScholarClient::with_config(
        ScholarConfig::new()
            .with_base_url(mock_server.uri())
            .with_api_key("s2-key"),
    );

    let records = take_results(client.search("anything"), 1).await.unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_rate_limited_response_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let mut stream = client.search("covid");

    let first = stream.next().await.expect("stream yields the error");
    assert_eq!(first.unwrap_err().category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_invalid_json_is_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/paper/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let err = take_results(client.search("covid"), 5).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MalformedPayload);
}
