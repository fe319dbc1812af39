//! PubMed search: query building and the E-utilities client
//!
//! - [`query`] - free-text and structured query builders
//! - [`client`] - ESearch/EFetch client returning [`CitationRecord`](citesearch_parser::CitationRecord)s

pub mod client;
pub mod query;

pub use client::PubMedClient;
pub use query::{
    DEFAULT_DOMAIN_QUALIFIER, MAX_RECENT_YEARS, RecencyClause, SearchQuery, StructuredQuery,
    StudyType, YearRange, free_text_query,
};
