#![deny(
    clippy::panic,
    clippy::absolute_paths,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # citesearch client
//!
//! Query building and async clients for literature search.
//!
//! ## Features
//!
//! - **PubMed**: free-text and structured query builders, ESearch/EFetch client
//!   returning normalized [`CitationRecord`]s in relevance order
//! - **Scholarly search**: lazily paged Semantic Scholar results
//! - **Web search**: result URLs scraped from DuckDuckGo's HTML endpoint
//! - **Summaries**: OpenAI-compatible chat completion summarizer
//! - **Rate limiting**: token bucket matching NCBI usage policy
//!
//! ## Quick Start
//!
//! ```no_run
//! use citesearch_client::PubMedClient;
//! use citesearch_client::pubmed::{StructuredQuery, StudyType, YearRange};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::new();
//!
//!     let query = StructuredQuery::new()
//!         .conditions(["Heart Failure", "Atrial Fibrillation"])
//!         .study_type(StudyType::RandomizedControlledTrial)
//!         .years(YearRange::new(2018, 2024)?)
//!         .build();
//!
//!     for record in client.search(&query, 10).await? {
//!         println!("{} {} ({})", record.id, record.title, record.publication_year);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pubmed;
pub mod rate_limit;
pub mod scholar;
pub mod stream;
pub mod summarize;
pub mod web;

// Re-export main types for convenience
pub use citesearch_parser::{CitationRecord, ScholarlyRecord};
pub use config::{ClientConfig, ScholarConfig, SummarizerConfig, WebSearchConfig};
pub use error::{ErrorCategory, Result, SearchError};
pub use pubmed::{PubMedClient, SearchQuery};
pub use scholar::{ScholarlySearch, SemanticScholarClient};
pub use stream::take_results;
pub use summarize::{ChatCompletionSummarizer, MAX_SUMMARY_RECORDS, Summarizer};
pub use web::{DuckDuckGoClient, WebSearch};
