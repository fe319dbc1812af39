pub mod export;
pub mod filter;
pub mod pubmed;
pub mod scholar;
pub mod summarize;
pub mod web;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use citesearch_client::pubmed::MAX_RECENT_YEARS;
use citesearch_client::{ClientConfig, PubMedClient, SearchError};
use citesearch_formatter::records_to_csv;
use citesearch_parser::CitationRecord;
use clap::ValueEnum;
use clap::builder::RangedI64ValueParser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

/// NCBI identification shared by every PubMed-backed command
#[derive(Debug, Clone, Copy)]
pub struct NcbiOptions<'a> {
    pub api_key: Option<&'a str>,
    pub email: Option<&'a str>,
    pub tool: &'a str,
}

pub fn create_pubmed_client(options: NcbiOptions<'_>) -> PubMedClient {
    let mut config = ClientConfig::new().with_tool(options.tool);

    if let Some(key) = options.api_key {
        config = config.with_api_key(key);
    }

    if let Some(email) = options.email {
        config = config.with_email(email);
    }

    PubMedClient::with_config(config)
}

/// Parser for `--recent-years`: 1 up to the longest supported window
pub fn recent_years_parser() -> RangedI64ValueParser<u32> {
    RangedI64ValueParser::new().range(1..=i64::from(MAX_RECENT_YEARS))
}

/// How PubMed results are printed
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    /// One PMID per line
    Ids,
}

pub fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Log a failed search and fall back to an empty result
///
/// Search failures never abort the CLI: the user gets the error, a hint and
/// an empty result list.
pub fn degrade<T: Default>(result: Result<T, SearchError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, category = ?err.category(), "Search failed");
            warn!("{}", err.hint());
            T::default()
        }
    }
}

pub fn render_records(records: &[CitationRecord], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Ids => records
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table if records.is_empty() => "No results found.".to_string(),
        OutputFormat::Table => records
            .iter()
            .enumerate()
            .map(|(i, record)| render_record(i + 1, record))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

fn render_record(position: usize, record: &CitationRecord) -> String {
    let mut lines = vec![format!("{position}. {}", record.title)];

    if !record.authors.is_empty() {
        let shown: Vec<&str> = record.authors.iter().take(3).map(String::as_str).collect();
        let suffix = if record.authors.len() > 3 { ", et al." } else { "" };
        lines.push(format!("   {}{suffix}", shown.join(", ")));
    }

    let source = match (record.journal.is_empty(), record.publication_year.is_empty()) {
        (false, false) => format!("{} ({})", record.journal, record.publication_year),
        (false, true) => record.journal.clone(),
        (true, false) => record.publication_year.clone(),
        (true, true) => String::new(),
    };
    if !source.is_empty() {
        lines.push(format!("   {source}"));
    }

    lines.push(format!(
        "   PMID {} https://pubmed.ncbi.nlm.nih.gov/{}/",
        record.id, record.id
    ));

    if !record.keywords.is_empty() {
        lines.push(format!("   Keywords: {}", record.keywords.join(", ")));
    }
    if record.has_abstract() {
        lines.push(format!("   {}", record.abstract_text));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Write the CSV export next to the printed results
pub fn save_csv(path: &Path, records: &[CitationRecord]) -> Result<()> {
    if records.is_empty() {
        warn!(path = %path.display(), "No records to save");
        return Ok(());
    }

    std::fs::write(path, records_to_csv(records)?)?;
    info!(path = %path.display(), records = records.len(), "Saved CSV export");
    Ok(())
}
