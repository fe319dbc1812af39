#![deny(
    clippy::panic,
    clippy::absolute_paths,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # citesearch formatter
//!
//! Export formats for [`CitationRecord`](citesearch_parser::CitationRecord)s:
//!
//! - **CSV** - one row per record, columns in record field order, readable back
//! - **RIS** - Zotero, Mendeley, EndNote
//! - **BibTeX** - LaTeX and most reference managers

pub mod citation;
pub mod error;
pub mod spreadsheet;

// Re-export main types for convenience
pub use citation::{ExportFormat, records_to_bibtex, records_to_ris};
pub use error::{ExportError, Result};
pub use spreadsheet::{CSV_HEADER, LIST_SEPARATOR, records_from_csv, records_to_csv};
