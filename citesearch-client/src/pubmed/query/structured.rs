//! Structured queries built from selected conditions and filters

use std::fmt;

use tracing::debug;

use super::SearchQuery;
use super::filters::StudyType;
use crate::error::{Result, SearchError};

/// Population qualifier applied when none is configured
pub const DEFAULT_DOMAIN_QUALIFIER: &str = "humans";

/// Inclusive publication year range with `min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    min: u16,
    max: u16,
}

impl YearRange {
    /// # Errors
    ///
    /// Returns `SearchError::InvalidQuery` when `min > max`.
    ///
    /// ```
    /// use citesearch_client::pubmed::YearRange;
    ///
    /// assert!(YearRange::new(2015, 2024).is_ok());
    /// assert!(YearRange::new(2024, 2015).is_err());
    /// ```
    pub fn new(min: u16, max: u16) -> Result<Self> {
        if min > max {
            return Err(SearchError::InvalidQuery(format!(
                "year range start {min} is after end {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn to_query_string(&self) -> String {
        format!("{}:{}[Publication Date]", self.min, self.max)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Builder for condition-based PubMed queries
///
/// Clauses appear in a fixed order joined by `AND`: the OR-group of
/// conditions, the MeSH domain qualifier, the OR-group of study types and the
/// publication date range.
///
/// # Example
///
/// ```
/// use citesearch_client::pubmed::{StructuredQuery, StudyType, YearRange};
///
/// let query = StructuredQuery::new()
///     .condition("Heart Failure")
///     .condition("Atrial Fibrillation")
///     .study_type(StudyType::RandomizedControlledTrial)
///     .years(YearRange::new(2015, 2024).unwrap())
///     .build();
///
/// assert_eq!(
///     query.as_str(),
///     "(Heart Failure OR Atrial Fibrillation) AND humans[MeSH Terms] \
///      AND (Randomized Controlled Trial[Publication Type]) \
///      AND 2015:2024[Publication Date]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredQuery {
    conditions: Vec<String>,
    study_types: Vec<StudyType>,
    years: Option<YearRange>,
    domain_qualifier: String,
}

impl StructuredQuery {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            study_types: Vec::new(),
            years: None,
            domain_qualifier: DEFAULT_DOMAIN_QUALIFIER.to_string(),
        }
    }

    /// Add a condition label; blank labels are ignored
    pub fn condition<S: AsRef<str>>(mut self, condition: S) -> Self {
        let condition = condition.as_ref().trim();
        if !condition.is_empty() && !self.conditions.iter().any(|c| c == condition) {
            self.conditions.push(condition.to_string());
        }
        self
    }

    pub fn conditions<I, S>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        conditions.into_iter().fold(self, Self::condition)
    }

    pub fn study_type(mut self, study_type: StudyType) -> Self {
        if !study_type.label().trim().is_empty() && !self.study_types.contains(&study_type) {
            self.study_types.push(study_type);
        }
        self
    }

    pub fn study_types<I: IntoIterator<Item = StudyType>>(self, study_types: I) -> Self {
        study_types.into_iter().fold(self, Self::study_type)
    }

    pub fn years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    /// Replace the `[MeSH Terms]` population qualifier; a blank value drops the clause
    pub fn domain_qualifier<S: Into<String>>(mut self, qualifier: S) -> Self {
        self.domain_qualifier = qualifier.into().trim().to_string();
        self
    }

    /// Render the query; no conditions means the empty query
    pub fn build(&self) -> SearchQuery {
        if self.conditions.is_empty() {
            debug!("No conditions selected, producing empty query");
            return SearchQuery::empty();
        }

        let mut clauses = vec![format!("({})", self.conditions.join(" OR "))];

        if !self.domain_qualifier.is_empty() {
            clauses.push(format!("{}[MeSH Terms]", self.domain_qualifier));
        }

        if !self.study_types.is_empty() {
            let types: Vec<String> = self
                .study_types
                .iter()
                .map(StudyType::to_query_string)
                .collect();
            clauses.push(format!("({})", types.join(" OR ")));
        }

        if let Some(years) = &self.years {
            clauses.push(years.to_query_string());
        }

        SearchQuery::raw(clauses.join(" AND "))
    }
}

impl Default for StructuredQuery {
    fn default() -> Self {
        Self::new()
    }
}
