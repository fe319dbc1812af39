use anyhow::Result;
use citesearch_client::{ScholarConfig, ScholarlySearch, SemanticScholarClient, take_results};
use citesearch_parser::ScholarlyRecord;
use clap::Args;
use tracing::info;

use super::{degrade, spinner};

#[derive(Args, Debug)]
pub struct Scholar {
    /// Search term
    #[arg(value_name = "QUERY")]
    query: String,

    /// Number of results to display
    #[arg(short, long, default_value = "5")]
    limit: usize,

    /// Semantic Scholar API key (optional, raises rate limits)
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

impl Scholar {
    pub async fn execute(&self) -> Result<()> {
        let mut config = ScholarConfig::new().with_page_size(self.limit);
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        let client = SemanticScholarClient::with_config(config);

        info!(query = %self.query, limit = self.limit, "Searching Semantic Scholar");
        let pb = spinner("Searching Semantic Scholar")?;
        let records = degrade(take_results(client.search(&self.query), self.limit).await);
        pb.finish_and_clear();

        println!("{}", render_scholarly(&records));
        Ok(())
    }
}

fn render_scholarly(records: &[ScholarlyRecord]) -> String {
    if records.is_empty() {
        return "No results found.".to_string();
    }

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut lines = vec![format!("{}. {}", i + 1, record.title)];
            if !record.author.is_empty() {
                lines.push(format!("   Author: {}", record.author));
            }
            if !record.journal.is_empty() {
                lines.push(format!("   Journal: {}", record.journal));
            }
            if !record.year.is_empty() {
                lines.push(format!("   Year: {}", record.year));
            }
            if !record.pub_url.is_empty() {
                lines.push(format!("   {}", record.pub_url));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
