use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(
    name = "citesearch",
    about = "Literature search for clinical scenarios",
    long_about = "Search PubMed, Semantic Scholar and the web for evidence on a clinical \
                  scenario, export citations and summarize the top results"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "citesearch", global = true)]
    tool: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search PubMed with a free-text clinical scenario
    Pubmed(commands::pubmed::Pubmed),
    /// Search PubMed by selected conditions, study types and years
    Filter(commands::filter::Filter),
    /// Search Semantic Scholar
    Scholar(commands::scholar::Scholar),
    /// Search the web for recent studies
    Web(commands::web::Web),
    /// Search PubMed and summarize the top results with a language model
    Summarize(commands::summarize::Summarize),
    /// Export citations for PMIDs as CSV, RIS or BibTeX
    Export(commands::export::Export),
}

impl Cli {
    fn ncbi(&self) -> commands::NcbiOptions<'_> {
        commands::NcbiOptions {
            api_key: self.api_key.as_deref(),
            email: self.email.as_deref(),
            tool: &self.tool,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for spinners
    let filter = if cli.verbose { "debug" } else { "info" };

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match &cli.command {
        Commands::Pubmed(cmd) => cmd.execute(cli.ncbi()).await,
        Commands::Filter(cmd) => cmd.execute(cli.ncbi()).await,
        Commands::Scholar(cmd) => cmd.execute().await,
        Commands::Web(cmd) => cmd.execute().await,
        Commands::Summarize(cmd) => cmd.execute(cli.ncbi()).await,
        Commands::Export(cmd) => cmd.execute(cli.ncbi()).await,
    }
}
