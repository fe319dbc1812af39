//! Query builders producing PubMed boolean queries
//!
//! Two input modes exist: verbatim free text (optionally restricted to recent
//! years) and structured selections of conditions, study types and a year
//! range. Both are pure and produce an immutable [`SearchQuery`].

mod filters;
mod free_text;
mod search_query;
mod structured;

pub use filters::StudyType;
pub use free_text::{MAX_RECENT_YEARS, RecencyClause, free_text_query};
pub use search_query::SearchQuery;
pub use structured::{DEFAULT_DOMAIN_QUALIFIER, StructuredQuery, YearRange};
