//! PubMed E-utilities payload parsing
//!
//! - [`parse_id_list`] reads the PMID list from an ESearch JSON response.
//! - [`parse_articles`] turns an EFetch XML response into citation records.

pub mod esearch;
pub mod parser;

pub use esearch::parse_id_list;
pub use parser::parse_articles;
