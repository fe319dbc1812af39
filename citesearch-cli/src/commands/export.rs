use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use citesearch_formatter::{records_to_bibtex, records_to_csv, records_to_ris};
use citesearch_parser::CitationRecord;
use clap::{Args, ValueEnum};
use tracing::{info, warn};

use super::{NcbiOptions, create_pubmed_client, degrade, spinner};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Ris,
    #[value(alias = "bib")]
    Bibtex,
}

#[derive(Args, Debug)]
pub struct Export {
    /// PubMed IDs to export
    #[arg(required = true)]
    pub pmids: Vec<String>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Export {
    pub async fn execute(&self, ncbi: NcbiOptions<'_>) -> Result<()> {
        let client = create_pubmed_client(ncbi);

        info!(
            pmids_count = self.pmids.len(),
            format = ?self.format,
            "Exporting citations"
        );

        let pb = spinner("Fetching records")?;
        let records = degrade(client.fetch_records(&self.pmids).await);
        pb.finish_and_clear();

        if records.is_empty() {
            warn!("No articles found for the given PMIDs");
            return Ok(());
        }

        let bytes = render_export(&records, self.format)?;

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, &bytes)?;
            info!(
                path = %output_path.display(),
                records = records.len(),
                "Exported {} records to {}",
                records.len(),
                output_path.display()
            );
        } else {
            let mut stdout = io::stdout();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }

        Ok(())
    }
}

fn render_export(records: &[CitationRecord], format: ExportFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Csv => records_to_csv(records)?,
        ExportFormat::Ris => format!("{}\n", records_to_ris(records)).into_bytes(),
        ExportFormat::Bibtex => format!("{}\n", records_to_bibtex(records)).into_bytes(),
    };
    Ok(bytes)
}
