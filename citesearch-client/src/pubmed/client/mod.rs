use std::collections::HashMap;

use citesearch_parser::CitationRecord;
use citesearch_parser::pubmed::{parse_articles, parse_id_list};
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SearchError};
use crate::pubmed::query::SearchQuery;
use crate::rate_limit::RateLimiter;

/// NCBI recommends at most 200 IDs per EFetch request
const FETCH_BATCH_SIZE: usize = 200;

/// Client for the PubMed ESearch and EFetch endpoints
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default configuration (3 requests/second, no API key)
    ///
    /// ```
    /// use citesearch_client::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client from explicit configuration
    ///
    /// ```
    /// use citesearch_client::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build configured HTTP client, using defaults");
                Client::new()
            });

        Self::with_client_and_config(client, config)
    }

    /// Use a caller-supplied HTTP client with default configuration
    pub fn with_client(client: Client) -> Self {
        Self::with_client_and_config(client, ClientConfig::new())
    }

    fn with_client_and_config(client: Client, config: ClientConfig) -> Self {
        Self {
            client,
            base_url: config.effective_base_url().to_string(),
            rate_limiter: config.create_rate_limiter(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run ESearch and return PMIDs in relevance order
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - the query is empty; no request is sent
    /// * `SearchError::ApiError` / `SearchError::RequestError` - transport failure
    /// * `SearchError::ParseError` - the response is not JSON
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_ids(&self, query: &SearchQuery, max_results: usize) -> Result<Vec<String>> {
        if query.is_empty() {
            debug!("Refusing to send empty query");
            return Err(SearchError::InvalidQuery(
                "query is empty; select at least one condition or enter a search term".to_string(),
            ));
        }

        if max_results == 0 {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&sort=relevance&retmode=json",
            self.base_url,
            urlencoding::encode(query.as_str()),
            max_results
        );

        debug!("Making ESearch API request");
        let body = self.get_text(&url).await?;

        let mut ids = parse_id_list(&body)?;
        ids.truncate(max_results);

        info!(found = ids.len(), "ESearch completed");
        Ok(ids)
    }

    /// Fetch full records for the given PMIDs, in the order the IDs were given
    ///
    /// Articles that lack a PMID or fail to deserialize are skipped by the
    /// parser; IDs that EFetch does not return are simply absent from the
    /// result.
    ///
    /// # Errors
    ///
    /// * `SearchError::InvalidQuery` - an ID is not numeric; checked before any request
    /// * `SearchError::ApiError` / `SearchError::RequestError` - transport failure
    /// * `SearchError::ParseError` - the EFetch document is malformed
    #[instrument(skip(self, pmids), fields(pmids_count = pmids.len()))]
    pub async fn fetch_records<S: AsRef<str>>(&self, pmids: &[S]) -> Result<Vec<CitationRecord>> {
        let mut ordered: Vec<&str> = Vec::with_capacity(pmids.len());
        for pmid in pmids {
            let pmid = pmid.as_ref().trim();
            if pmid.is_empty() || !pmid.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SearchError::InvalidQuery(format!("invalid PMID: {pmid:?}")));
            }
            if !ordered.contains(&pmid) {
                ordered.push(pmid);
            }
        }

        if ordered.is_empty() {
            return Ok(Vec::new());
        }

        let mut fetched: HashMap<String, CitationRecord> = HashMap::with_capacity(ordered.len());

        for chunk in ordered.chunks(FETCH_BATCH_SIZE) {
            let url = format!(
                "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
                self.base_url,
                chunk.join(",")
            );

            debug!(batch_size = chunk.len(), "Making batch EFetch API request");
            let body = self.get_text(&url).await?;

            let records = parse_articles(&body)?;
            info!(
                requested = chunk.len(),
                parsed = records.len(),
                "Batch fetch completed"
            );

            for record in records {
                fetched.entry(record.id.clone()).or_insert(record);
            }
        }

        let records: Vec<CitationRecord> = ordered
            .iter()
            .filter_map(|pmid| fetched.remove(*pmid))
            .collect();

        if !fetched.is_empty() {
            debug!(
                unexpected = fetched.len(),
                "Dropping records that were not requested"
            );
        }

        Ok(records)
    }

    /// ESearch followed by EFetch; at most `max_results` records in relevance order
    ///
    /// ```no_run
    /// use citesearch_client::PubMedClient;
    /// use citesearch_client::pubmed::{RecencyClause, free_text_query};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = PubMedClient::new();
    ///     let query = free_text_query("community acquired pneumonia", Some(&RecencyClause::trailing(2)));
    ///     for record in client.search(&query, 10).await? {
    ///         println!("{}: {}", record.id, record.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<CitationRecord>> {
        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = self.fetch_records(&ids).await?;
        records.truncate(max_results);
        Ok(records)
    }

    /// GET with the configured E-utilities parameters appended, returning the body
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.make_request(url).await?;
        Ok(response.text().await?)
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        self.rate_limiter.acquire().await?;
        // Logged before the credentials are appended
        debug!(url = %url, "Making API request");
        let response = self.client.get(&final_url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
