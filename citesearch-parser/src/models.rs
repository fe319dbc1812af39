use serde::{Deserialize, Serialize};

/// Title used when an article carries no usable `ArticleTitle`
pub const MISSING_TITLE_PLACEHOLDER: &str = "No title available";

/// Normalized representation of one found publication
///
/// Field order is significant: tabular exports emit columns in declaration order.
///
/// # Example
///
/// ```
/// use citesearch_parser::CitationRecord;
///
/// let record = CitationRecord::new("31978945");
/// assert_eq!(record.id, "31978945");
/// assert_eq!(record.title, "No title available");
/// assert!(record.authors.is_empty());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CitationRecord {
    /// External identifier (PMID for PubMed records)
    pub id: String,
    /// Article title, or [`MISSING_TITLE_PLACEHOLDER`]
    pub title: String,
    /// Abstract text, empty when the article has none
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Authors formatted as "Last First", in document order
    pub authors: Vec<String>,
    /// Journal title, empty when unknown
    pub journal: String,
    /// Four-digit publication year, empty when unknown
    pub publication_year: String,
    /// Author keywords, in document order
    pub keywords: Vec<String>,
}

impl CitationRecord {
    /// Create a record with only the mandatory identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: MISSING_TITLE_PLACEHOLDER.to_string(),
            abstract_text: String::new(),
            authors: Vec::new(),
            journal: String::new(),
            publication_year: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Whether the record has a non-empty abstract
    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.trim().is_empty()
    }

    /// First author in "Last First" form, if any
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }
}

/// Bibliographic record returned by a scholarly search service
///
/// Every field is a plain string; services that omit a field leave it empty.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ScholarlyRecord {
    pub title: String,
    /// Authors joined with ", "
    pub author: String,
    pub journal: String,
    pub year: String,
    pub pub_url: String,
}
