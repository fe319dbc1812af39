use std::{io, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The CSV header does not match the record columns
    #[error("Unexpected CSV header: expected {expected}, found {found}")]
    UnexpectedHeader { expected: String, found: String },
}

pub type Result<T> = result::Result<T, ExportError>;
