//! Free-text queries with an optional recency restriction

use time::OffsetDateTime;

use super::SearchQuery;

/// Longest recency window accepted; larger requests are clamped
pub const MAX_RECENT_YEARS: u32 = 50;

/// Disjunction of publication years appended to free-text queries
///
/// Rendered as `(2023 OR 2024)`; PubMed matches bare years against the
/// publication date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyClause {
    years: Vec<i32>,
}

impl RecencyClause {
    /// Explicit years, sorted and deduplicated
    pub fn years<I: IntoIterator<Item = i32>>(years: I) -> Self {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();
        Self { years }
    }

    /// The `n` calendar years ending at `last_year`, inclusive
    ///
    /// `n` is clamped to [`MAX_RECENT_YEARS`].
    pub fn ending_at(last_year: i32, n: u32) -> Self {
        if n == 0 {
            return Self { years: Vec::new() };
        }
        let span = n.min(MAX_RECENT_YEARS) as i32;
        let first = last_year.saturating_sub(span - 1);
        Self::years(first..=last_year)
    }

    /// The trailing `n` years ending at the current UTC year
    pub fn trailing(n: u32) -> Self {
        Self::ending_at(OffsetDateTime::now_utc().year(), n)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        let years: Vec<String> = self.years.iter().map(ToString::to_string).collect();
        format!("({})", years.join(" OR "))
    }
}

/// Build a query from user text, kept verbatim
///
/// The recency clause, when present and non-empty, is appended after a single
/// space. Blank text yields the empty query regardless of the clause.
///
/// ```
/// use citesearch_client::pubmed::{free_text_query, RecencyClause};
///
/// let recency = RecencyClause::years([2024, 2023]);
/// let query = free_text_query("sepsis fluids", Some(&recency));
/// assert_eq!(query.as_str(), "sepsis fluids (2023 OR 2024)");
/// ```
pub fn free_text_query(text: &str, recency: Option<&RecencyClause>) -> SearchQuery {
    if text.trim().is_empty() {
        return SearchQuery::empty();
    }

    match recency {
        Some(clause) if !clause.is_empty() => {
            SearchQuery::raw(format!("{} {}", text, clause.to_query_string()))
        }
        _ => SearchQuery::raw(text),
    }
}
