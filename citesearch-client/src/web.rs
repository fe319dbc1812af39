//! Generic web search returning result URLs

use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::config::WebSearchConfig;
use crate::error::{Result, SearchError};

const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// A web search engine yielding result URLs
pub trait WebSearch: Send + Sync {
    /// Lazily stream result URLs in ranking order
    fn search<'a>(&'a self, query: &'a str) -> BoxStream<'a, Result<String>>;
}

/// Scraper for the DuckDuckGo HTML endpoint
#[derive(Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    config: WebSearchConfig,
}

impl DuckDuckGoClient {
    pub fn new() -> Self {
        Self::with_config(WebSearchConfig::new())
    }

    pub fn with_config(config: WebSearchConfig) -> Self {
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

    #[instrument(skip(self))]
    async fn fetch_links(&self, query: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/html/?q={}&kl={}",
            self.config.effective_base_url(),
            urlencoding::encode(query),
            urlencoding::encode(&self.config.region)
        );

        debug!("Requesting web results");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            warn!("Web search failed with status: {}", response.status());
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let html = response.text().await?;
        let links = parse_result_links(&html)?;
        debug!(links = links.len(), "Parsed result links");
        Ok(links)
    }
}

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearch for DuckDuckGoClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxStream<'a, Result<String>> {
        if query.trim().is_empty() {
            return stream::once(async {
                Err(SearchError::InvalidQuery("search term is empty".to_string()))
            })
            .boxed();
        }

        stream::once(async move {
            let links = self.fetch_links(query).await?;
            Ok::<_, SearchError>(stream::iter(links.into_iter().map(Ok::<_, SearchError>)))
        })
        .try_flatten()
        .boxed()
    }
}

/// Extract target URLs from a DuckDuckGo HTML results page
///
/// Redirect links (`/l/?uddg=<encoded target>`) are unwrapped, protocol
/// relative links get `https:`, ads and non-HTTP links are dropped and
/// duplicates keep their first position.
///
/// ```
/// use citesearch_client::web::parse_result_links;
///
/// let html = r#"<a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fa&rut=x">A</a>"#;
/// assert_eq!(parse_result_links(html).unwrap(), vec!["https://example.org/a"]);
/// ```
pub fn parse_result_links(html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(RESULT_LINK_SELECTOR)
        .map_err(|e| SearchError::HtmlError(format!("invalid selector: {e}")))?;
    let document = Html::parse_document(html);

    let mut links: Vec<String> = Vec::new();
    for href in document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
    {
        let Some(link) = resolve_result_href(href) else {
            continue;
        };
        if !links.contains(&link) {
            links.push(link);
        }
    }

    Ok(links)
}

fn resolve_result_href(href: &str) -> Option<String> {
    let href = href.trim();

    if href.contains("duckduckgo.com/y.js") {
        return None;
    }

    let target = match href.split_once("uddg=") {
        Some((_, rest)) => {
            let encoded = rest.split('&').next().unwrap_or_default();
            urlencoding::decode(encoded).ok()?.into_owned()
        }
        None => href.to_string(),
    };

    let target = if target.starts_with("//") {
        format!("https:{target}")
    } else {
        target
    };

    (target.starts_with("http://") || target.starts_with("https://")).then_some(target)
}
