#![deny(
    clippy::panic,
    clippy::absolute_paths,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # citesearch parser
//!
//! Citation data model and parsers for PubMed E-utilities payloads.
//!
//! This crate provides pure, stateless functions that turn raw ESearch JSON and
//! EFetch XML responses into normalized [`CitationRecord`] values. It has no
//! network dependencies and can be used independently of any HTTP client.
//!
//! ```
//! use citesearch_parser::pubmed::{parse_articles, parse_id_list};
//!
//! let ids = parse_id_list(r#"{"esearchresult":{"idlist":["31978945"]}}"#)?;
//! assert_eq!(ids, vec!["31978945".to_string()]);
//!
//! let xml = r#"<PubmedArticleSet>
//!   <PubmedArticle>
//!     <MedlineCitation>
//!       <PMID>31978945</PMID>
//!       <Article><ArticleTitle>A pneumonia outbreak</ArticleTitle></Article>
//!     </MedlineCitation>
//!   </PubmedArticle>
//! </PubmedArticleSet>"#;
//! let records = parse_articles(xml)?;
//! assert_eq!(records[0].title, "A pneumonia outbreak");
//! # Ok::<(), citesearch_parser::ParseError>(())
//! ```

pub mod error;
pub mod models;
pub mod pubmed;

// Re-export main types for convenience
pub use error::{ParseError, Result};
pub use models::{CitationRecord, MISSING_TITLE_PLACEHOLDER, ScholarlyRecord};
