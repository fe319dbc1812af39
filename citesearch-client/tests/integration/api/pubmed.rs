//! Real PubMed E-utilities tests
//!
//! These make network calls and only run when both:
//! 1. the `integration-tests` feature is enabled
//! 2. the `CITESEARCH_REAL_API_TESTS` environment variable is set
//!
//! ```bash
//! CITESEARCH_REAL_API_TESTS=1 cargo test -p citesearch-client --features integration-tests --test pubmed_api_tests
//! ```

#[cfg(feature = "integration-tests")]
mod integration_tests {
    use std::env;

    use citesearch_client::pubmed::{StructuredQuery, StudyType, YearRange};
    use citesearch_client::{ClientConfig, PubMedClient, SearchQuery};
    use tracing::info;
    use tracing_test::traced_test;

    fn should_run_real_api_tests() -> bool {
        env::var("CITESEARCH_REAL_API_TESTS").is_ok()
    }

    fn create_test_client() -> PubMedClient {
        let mut config = ClientConfig::new().with_tool("citesearch-tests");
        if let Ok(key) = env::var("NCBI_API_KEY") {
            config = config.with_api_key(key);
        }
        PubMedClient::with_config(config)
    }

    #[tokio::test]
    #[traced_test]
    async fn test_fetch_known_article() {
        if !should_run_real_api_tests() {
            info!("Skipping real API test - enable with CITESEARCH_REAL_API_TESTS=1");
            return;
        }

        let client = create_test_client();
        let records = client.fetch_records(&["31978945"]).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "31978945");
        assert_eq!(records[0].journal, "Nature");
        assert_eq!(records[0].publication_year, "2020");
        assert!(records[0].has_abstract());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_structured_search() {
        if !should_run_real_api_tests() {
            info!("Skipping real API test - enable with CITESEARCH_REAL_API_TESTS=1");
            return;
        }

        let client = create_test_client();
        let query = StructuredQuery::new()
            .condition("Heart Failure")
            .study_type(StudyType::RandomizedControlledTrial)
            .years(YearRange::new(2019, 2022).unwrap())
            .build();

        let records = client.search(&query, 5).await.unwrap();
        info!(found = records.len(), "Structured search completed");

        assert!(!records.is_empty());
        assert!(records.len() <= 5);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_free_text_search_respects_limit() {
        if !should_run_real_api_tests() {
            info!("Skipping real API test - enable with CITESEARCH_REAL_API_TESTS=1");
            return;
        }

        let client = create_test_client();
        let ids = client
            .search_ids(&SearchQuery::raw("covid-19 vaccine myocarditis"), 3)
            .await
            .unwrap();

        assert_eq!(ids.len(), 3);
    }
}
