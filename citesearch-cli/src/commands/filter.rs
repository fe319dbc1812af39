use std::path::PathBuf;

use anyhow::Result;
use citesearch_client::pubmed::{DEFAULT_DOMAIN_QUALIFIER, StructuredQuery, StudyType, YearRange};
use citesearch_client::{SearchError, SearchQuery};
use clap::Args;
use tracing::info;

use super::{
    NcbiOptions, OutputFormat, create_pubmed_client, degrade, render_records, save_csv, spinner,
};

#[derive(Args, Debug)]
pub struct Filter {
    /// Condition to include (repeatable; combined with OR)
    #[arg(short, long = "condition", value_name = "CONDITION")]
    conditions: Vec<String>,

    /// Publication type to include (repeatable; e.g. rct, meta-analysis, review)
    #[arg(short = 't', long = "study-type", value_name = "TYPE")]
    study_types: Vec<StudyType>,

    /// First publication year
    #[arg(long, requires = "to_year")]
    from_year: Option<u16>,

    /// Last publication year
    #[arg(long, requires = "from_year")]
    to_year: Option<u16>,

    /// MeSH population qualifier
    #[arg(long, default_value = DEFAULT_DOMAIN_QUALIFIER)]
    domain: String,

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

impl Filter {
    pub async fn execute(&self, ncbi: NcbiOptions<'_>) -> Result<()> {
        let client = create_pubmed_client(ncbi);

        let pb = spinner("Searching PubMed")?;
        let result = match self.build_query() {
            Ok(query) => {
                info!(query = %query, limit = self.limit, "Searching PubMed");
                client.search(&query, self.limit).await
            }
            Err(err) => Err(err),
        };
        let records = degrade(result);
        pb.finish_and_clear();

        println!("{}", render_records(&records, self.format)?);

        if let Some(path) = &self.csv {
            save_csv(path, &records)?;
        }

        Ok(())
    }

    fn build_query(&self) -> Result<SearchQuery, SearchError> {
        let mut query = StructuredQuery::new()
            .conditions(&self.conditions)
            .study_types(self.study_types.iter().cloned())
            .domain_qualifier(&self.domain);

        if let (Some(from), Some(to)) = (self.from_year, self.to_year) {
            query = query.years(YearRange::new(from, to)?);
        }

        Ok(query.build())
    }
}
