use anyhow::Result;
use citesearch_client::pubmed::{RecencyClause, free_text_query};
use citesearch_client::{DuckDuckGoClient, WebSearch, take_results};
use clap::Args;
use tracing::info;

use super::{degrade, recent_years_parser, spinner};

#[derive(Args, Debug)]
pub struct Web {
    /// Search term (e.g. "artificial intelligence in healthcare")
    #[arg(value_name = "QUERY")]
    query: String,

    /// Restrict to the last N calendar years, including the current one
    #[arg(long, value_name = "N", default_value = "2", value_parser = recent_years_parser())]
    recent_years: u32,

    /// Number of results to display
    #[arg(short, long, default_value = "5")]
    limit: usize,
}

impl Web {
    pub async fn execute(&self) -> Result<()> {
        let client = DuckDuckGoClient::new();
        let recency = RecencyClause::trailing(self.recent_years);
        let query = free_text_query(&self.query, Some(&recency));

        info!(query = %query, limit = self.limit, "Searching the web");
        let pb = spinner("Searching the web")?;
        let urls = degrade(take_results(client.search(query.as_str()), self.limit).await);
        pb.finish_and_clear();

        println!("{}", render_urls(&urls));
        Ok(())
    }
}

fn render_urls(urls: &[String]) -> String {
    if urls.is_empty() {
        return "No results found.".to_string();
    }

    urls.iter()
        .enumerate()
        .map(|(i, url)| format!("{}. {url}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
