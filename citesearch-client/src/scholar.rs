//! Scholarly search over the Semantic Scholar Graph API
//!
//! Results arrive as a lazy stream: a page is requested only when the
//! consumer polls past the records already received, so truncating with
//! [`take_results`](crate::stream::take_results) bounds the number of requests.

use citesearch_parser::ScholarlyRecord;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::ScholarConfig;
use crate::error::{Result, SearchError};

const SEARCH_FIELDS: &str = "title,authors,venue,year,url,journal";

/// A source of bibliographic records for a free-text query
pub trait ScholarlySearch: Send + Sync {
    /// Lazily stream records in upstream relevance order
    fn search<'a>(&'a self, query: &'a str) -> BoxStream<'a, Result<ScholarlyRecord>>;
}

#[derive(Debug, Deserialize)]
struct S2SearchPage {
    #[serde(default)]
    next: Option<usize>,
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
struct S2Paper {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<S2Author>,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    journal: Option<S2Journal>,
    #[serde(default)]
    year: Option<u32>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Journal {
    #[serde(default)]
    name: Option<String>,
}

impl From<S2Paper> for ScholarlyRecord {
    fn from(paper: S2Paper) -> Self {
        let author = paper
            .authors
            .into_iter()
            .filter_map(|a| a.name)
            .filter(|name| !name.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        // Venue is the normalized name; journal.name is only set for journal articles
        let journal = paper
            .venue
            .filter(|v| !v.trim().is_empty())
            .or_else(|| paper.journal.and_then(|j| j.name))
            .unwrap_or_default();

        ScholarlyRecord {
            title: paper.title.unwrap_or_default(),
            author,
            journal,
            year: paper.year.map(|y| y.to_string()).unwrap_or_default(),
            pub_url: paper.url.unwrap_or_default(),
        }
    }
}

/// Semantic Scholar `/paper/search` client
///
/// ```no_run
/// use citesearch_client::scholar::{ScholarlySearch, SemanticScholarClient};
/// use citesearch_client::stream::take_results;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SemanticScholarClient::new();
///     let records = take_results(client.search("sglt2 inhibitors heart failure"), 5).await?;
///     for record in records {
///         println!("{} ({})", record.title, record.year);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SemanticScholarClient {
    client: Client,
    config: ScholarConfig,
}

impl SemanticScholarClient {
    pub fn new() -> Self {
        Self::with_config(ScholarConfig::new())
    }

    pub fn with_config(config: ScholarConfig) -> Self {
        let client = Client::builder()
            .user_agent(concat!("citesearch/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build configured HTTP client, using defaults");
                Client::new()
            });

        Self { client, config }
    }

    #[instrument(skip(self), fields(offset = offset))]
    async fn fetch_page(&self, query: &str, offset: usize) -> Result<S2SearchPage> {
        let url = format!(
            "{}/paper/search?query={}&offset={}&limit={}&fields={}",
            self.config.effective_base_url(),
            urlencoding::encode(query),
            offset,
            self.config.page_size,
            SEARCH_FIELDS
        );

        let mut request = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-api-key", key);
        }

        debug!("Requesting Semantic Scholar page");
        let response = request.send().await?;

        if !response.status().is_success() {
            warn!("Semantic Scholar request failed with status: {}", response.status());
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let page: S2SearchPage = serde_json::from_str(&body)?;
        debug!(received = page.data.len(), next = ?page.next, "Received page");
        Ok(page)
    }
}

impl Default for SemanticScholarClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ScholarlySearch for SemanticScholarClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxStream<'a, Result<ScholarlyRecord>> {
        if query.trim().is_empty() {
            return stream::once(async {
                Err(SearchError::InvalidQuery("search term is empty".to_string()))
            })
            .boxed();
        }

        stream::try_unfold(Some(0usize), move |offset| async move {
            let Some(offset) = offset else {
                return Ok(None);
            };

            let page = self.fetch_page(query, offset).await?;
            // An empty page ends the stream even if the API advertises more
            let next = page.next.filter(|_| !page.data.is_empty());
            let records = stream::iter(
                page.data
                    .into_iter()
                    .map(|paper| Ok::<_, SearchError>(ScholarlyRecord::from(paper))),
            );

            Ok::<_, SearchError>(Some((records, next)))
        })
        .try_flatten()
        .boxed()
    }
}
