//! PubMed search tests using mocked E-utilities responses
//!
//! wiremock stands in for NCBI, so these run offline and can assert on the
//! exact requests the client sends.

use citesearch_client::pubmed::{RecencyClause, StructuredQuery, YearRange, free_text_query};
use citesearch_client::{ClientConfig, ErrorCategory, PubMedClient, SearchError, SearchQuery};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0);

    PubMedClient::with_config(config)
}

fn esearch_body(ids: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "header": {"type": "esearch", "version": "0.3"},
        "esearchresult": {
            "count": ids.len().to_string(),
            "retmax": ids.len().to_string(),
            "retstart": "0",
            "idlist": ids,
        }
    })
}

fn article_xml(pmid: &str, title: &str) -> String {
    format!(
        r#"<PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
        <PMID Version="1">{pmid}</PMID>
        <Article>
            <Journal>
                <JournalIssue><PubDate><Year>2022</Year></PubDate></JournalIssue>
                <Title>Circulation</Title>
            </Journal>
            <ArticleTitle>{title}</ArticleTitle>
            <Abstract><AbstractText>Abstract of {pmid}.</AbstractText></Abstract>
            <AuthorList>
                <Author><LastName>Doe</LastName><ForeName>Jane</ForeName></Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>"#
    )
}

fn efetch_body(articles: &[(&str, &str)]) -> String {
    let body: String = articles
        .iter()
        .map(|(pmid, title)| article_xml(pmid, title))
        .collect();
    format!("<?xml version=\"1.0\" ?>\n<PubmedArticleSet>\n{body}\n</PubmedArticleSet>")
}

#[tokio::test]
#[traced_test]
async fn test_search_returns_records_in_esearch_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "heart failure (2023 OR 2024)"))
        .and(query_param("retmax", "3"))
        .and(query_param("sort", "relevance"))
        .and(query_param("retmode", "json"))
        .and(query_param("tool", "citesearch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["300", "100", "200"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // EFetch answers in ascending PMID order, not relevance order
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "300,100,200"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(efetch_body(&[
            ("100", "First by PMID"),
            ("200", "Second by PMID"),
            ("300", "Most relevant"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = free_text_query("heart failure", Some(&RecencyClause::years([2023, 2024])));

    let records = client.search(&query, 3).await.expect("search should succeed");

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["300", "100", "200"]);
    assert_eq!(records[0].title, "Most relevant");
    assert_eq!(records[0].journal, "Circulation");
    assert_eq!(records[0].publication_year, "2022");
    assert_eq!(records[0].authors, vec!["Doe Jane"]);
}

#[tokio::test]
async fn test_structured_query_is_sent_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param(
            "term",
            "(Asthma OR COPD) AND humans[MeSH Terms] AND 2019:2024[Publication Date]",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["42"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let query = StructuredQuery::new()
        .conditions(["Asthma", "COPD"])
        .years(YearRange::new(2019, 2024).unwrap())
        .build();

    let ids = client.search_ids(&query, 20).await.unwrap();
    assert_eq!(ids, vec!["42"]);
}

#[tokio::test]
async fn test_api_params_are_appended() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("api_key", "secret-key"))
        .and(query_param("email", "dev@example.org"))
        .and(query_param("tool", "ward-rounds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_api_key("secret-key")
        .with_email("dev@example.org")
        .with_tool("ward-rounds");
    let client = PubMedClient::with_config(config);

    let ids = client
        .search_ids(&SearchQuery::raw("gout"), 5)
        .await
        .unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_empty_query_sends_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);

    let free_text = free_text_query("   ", None);
    let err = client.search(&free_text, 10).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::InvalidQuery);

    let structured = StructuredQuery::new().build();
    let err = client.search(&structured, 10).await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidQuery(_)));
}

#[tokio::test]
async fn test_no_hits_skips_efetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "esearchresult": {"count": "0", "idlist": []}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client
        .search(&SearchQuery::raw("zzzz unlikely term"), 10)
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_esearch_ids_truncated_to_max_results() {
    let mock_server = MockServer::start().await;

    // Upstream ignores retmax and returns more than requested
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(esearch_body(&["1", "2", "3", "4", "5"])),
        )
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let ids = client
        .search_ids(&SearchQuery::raw("sepsis"), 2)
        .await
        .unwrap();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
#[traced_test]
async fn test_server_error_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search(&SearchQuery::raw("stroke"), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::ApiError { status: 503, .. }));
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn test_garbage_efetch_is_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["7"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search(&SearchQuery::raw("pneumonia"), 5)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::MalformedPayload);
}

#[tokio::test]
async fn test_non_json_esearch_is_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let err = client
        .search_ids(&SearchQuery::raw("pneumonia"), 5)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::MalformedPayload);
}

#[tokio::test]
#[traced_test]
async fn test_article_without_pmid_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["10", "30"])))
        .mount(&mock_server)
        .await;

    let efetch = format!(
        "<PubmedArticleSet>{}<PubmedArticle><MedlineCitation><Article><ArticleTitle>No id</ArticleTitle></Article></MedlineCitation></PubmedArticle>{}</PubmedArticleSet>",
        article_xml("10", "Kept"),
        article_xml("30", "Also kept"),
    );
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(efetch))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let records = client
        .search(&SearchQuery::raw("anything"), 10)
        .await
        .unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Kept", "Also kept"]);
}
