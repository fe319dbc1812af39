use std::fmt;

/// A finished query in PubMed's boolean grammar
///
/// Built once by [`free_text_query`](super::free_text_query) or
/// [`StructuredQuery::build`](super::StructuredQuery::build) and never
/// mutated afterwards. The empty query is a valid value but clients refuse
/// to send it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Wrap an already formatted query string, trimming outer whitespace
    ///
    /// ```
    /// use citesearch_client::pubmed::SearchQuery;
    ///
    /// let query = SearchQuery::raw("  asthma[MeSH Terms] ");
    /// assert_eq!(query.as_str(), "asthma[MeSH Terms]");
    /// ```
    pub fn raw<S: AsRef<str>>(query: S) -> Self {
        Self(query.as_ref().trim().to_string())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
