use anyhow::Result;
use citesearch_client::pubmed::{RecencyClause, free_text_query};
use citesearch_client::{
    ChatCompletionSummarizer, MAX_SUMMARY_RECORDS, Summarizer, SummarizerConfig,
};
use clap::Args;
use tracing::{error, info, warn};

use super::{
    NcbiOptions, OutputFormat, create_pubmed_client, degrade, recent_years_parser, render_records,
    spinner,
};

#[derive(Args, Debug)]
pub struct Summarize {
    /// Clinical scenario to search for and summarize
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Restrict to the last N calendar years, including the current one
    #[arg(long, value_name = "N", value_parser = recent_years_parser())]
    recent_years: Option<u32>,

    /// Number of PubMed records to retrieve (at most 5 go into the summary)
    #[arg(short, long, default_value_t = MAX_SUMMARY_RECORDS)]
    limit: usize,

    /// API key for the language model endpoint
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true)]
    llm_api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "LLM_BASE_URL")]
    llm_base_url: Option<String>,

    /// Model name
    #[arg(long, env = "LLM_MODEL")]
    model: Option<String>,
}

impl Summarize {
    pub async fn execute(&self, ncbi: NcbiOptions<'_>) -> Result<()> {
        let client = create_pubmed_client(ncbi);
        let recency = self.recent_years.map(RecencyClause::trailing);
        let query = free_text_query(&self.scenario, recency.as_ref());

        info!(query = %query, limit = self.limit, "Searching PubMed");
        let pb = spinner("Searching PubMed")?;
        let records = degrade(client.search(&query, self.limit).await);
        pb.finish_and_clear();

        println!("{}", render_records(&records, OutputFormat::Table)?);

        if records.is_empty() {
            warn!("Nothing to summarize");
            return Ok(());
        }

        let summarizer = ChatCompletionSummarizer::new(self.summarizer_config());
        let pb = spinner("Generating summary")?;
        let summary = summarizer.summarize(&self.scenario, &records).await;
        pb.finish_and_clear();

        match summary {
            Ok(summary) => println!("Summary\n-------\n{summary}"),
            Err(err) => {
                error!(error = %err, category = ?err.category(), "Summarization failed");
                warn!("{}", err.hint());
            }
        }

        Ok(())
    }

    fn summarizer_config(&self) -> SummarizerConfig {
        let mut config = SummarizerConfig::new();
        if let Some(key) = &self.llm_api_key {
            config = config.with_api_key(key);
        }
        if let Some(base_url) = &self.llm_base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        config
    }
}
