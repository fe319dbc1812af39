use std::result;

use thiserror::Error;

/// Error types for payload parsing operations
///
/// Both variants describe a payload that could not be read at the top level.
/// Problems confined to a single article never surface here: the article is
/// skipped and the batch continues.
#[derive(Error, Debug)]
pub enum ParseError {
    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, ParseError>;
