use std::path::PathBuf;

use anyhow::Result;
use citesearch_client::SearchQuery;
use citesearch_client::pubmed::{RecencyClause, free_text_query};
use clap::Args;
use tracing::info;

use super::{
    NcbiOptions, OutputFormat, create_pubmed_client, degrade, recent_years_parser, render_records,
    save_csv, spinner,
};

#[derive(Args, Debug)]
pub struct Pubmed {
    /// Clinical scenario or keywords, sent verbatim
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Restrict to the last N calendar years, including the current one
    #[arg(long, value_name = "N", value_parser = recent_years_parser())]
    recent_years: Option<u32>,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also save results as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

impl Pubmed {
    pub async fn execute(&self, ncbi: NcbiOptions<'_>) -> Result<()> {
        let client = create_pubmed_client(ncbi);
        let query = self.build_query();
        info!(query = %query, limit = self.limit, "Searching PubMed");

        let pb = spinner("Searching PubMed")?;
        let records = degrade(client.search(&query, self.limit).await);
        pb.finish_and_clear();

        println!("{}", render_records(&records, self.format)?);

        if let Some(path) = &self.csv {
            save_csv(path, &records)?;
        }

        Ok(())
    }

    fn build_query(&self) -> SearchQuery {
        let recency = self.recent_years.map(RecencyClause::trailing);
        free_text_query(&self.scenario, recency.as_ref())
    }
}
