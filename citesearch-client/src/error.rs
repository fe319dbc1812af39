use std::result;

use citesearch_parser::ParseError;
use thiserror::Error;

/// Error types for search, fetch and summarization operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Upstream answered with a non-success status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// ESearch JSON or EFetch XML could not be parsed
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// JSON body from a non-PubMed service could not be parsed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTML results page could not be processed
    #[error("HTML parsing failed: {0}")]
    HtmlError(String),

    /// Query is empty or its parameters are inconsistent; nothing was sent
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// API rate limit exceeded
    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    /// Language model endpoint returned no usable summary
    #[error("Summarization failed: {0}")]
    SummarizationError(String),
}

pub type Result<T> = result::Result<T, SearchError>;

/// Coarse classification used to decide how a failure is reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection failure or non-2xx status
    Transport,
    /// Response arrived but its top-level payload is unreadable
    MalformedPayload,
    /// The query was never sent
    InvalidQuery,
    /// The summarization collaborator failed
    Summarization,
}

impl SearchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::RequestError(_)
            | SearchError::ApiError { .. }
            | SearchError::RateLimitExceeded => ErrorCategory::Transport,
            SearchError::ParseError(_) | SearchError::JsonError(_) | SearchError::HtmlError(_) => {
                ErrorCategory::MalformedPayload
            }
            SearchError::InvalidQuery(_) => ErrorCategory::InvalidQuery,
            SearchError::SummarizationError(_) => ErrorCategory::Summarization,
        }
    }

    /// Short user-facing hint for this error
    pub fn hint(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "Please check your search term and internet connection.",
            ErrorCategory::MalformedPayload => "The search service returned an unreadable response.",
            ErrorCategory::InvalidQuery => "Select at least one condition or enter a search term.",
            ErrorCategory::Summarization => "The summary service did not return a result.",
        }
    }
}
