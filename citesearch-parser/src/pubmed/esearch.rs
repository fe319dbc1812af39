//! ESearch JSON response parsing

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::Result;

#[derive(Debug, Deserialize)]
struct ESearchEnvelope {
    #[serde(default)]
    esearchresult: Option<ESearchData>,
}

#[derive(Debug, Deserialize)]
struct ESearchData {
    #[serde(default)]
    count: Option<String>,
    #[serde(default)]
    idlist: Option<Vec<String>>,
    #[serde(rename = "ERROR", default)]
    error: Option<String>,
}

/// Extract the PMID list from an ESearch JSON response
///
/// Reads `esearchresult.idlist`. A missing path is not an error: it means the
/// search found nothing, and an empty list is returned.
///
/// # Errors
///
/// Returns [`ParseError::JsonError`](crate::ParseError::JsonError) if the payload is
/// not a JSON object.
///
/// # Example
///
/// ```
/// use citesearch_parser::pubmed::parse_id_list;
///
/// let ids = parse_id_list(r#"{"esearchresult":{"idlist":["1","2"]}}"#)?;
/// assert_eq!(ids, vec!["1", "2"]);
///
/// assert!(parse_id_list("{}")?.is_empty());
/// # Ok::<(), citesearch_parser::ParseError>(())
/// ```
#[instrument(skip(json), fields(json_size = json.len()))]
pub fn parse_id_list(json: &str) -> Result<Vec<String>> {
    let envelope: ESearchEnvelope = serde_json::from_str(json)?;

    let Some(data) = envelope.esearchresult else {
        debug!("ESearch response has no esearchresult, treating as empty");
        return Ok(Vec::new());
    };

    if let Some(message) = &data.error {
        warn!(error = %message, "ESearch reported an error");
    }

    let ids = data.idlist.unwrap_or_default();
    debug!(
        ids = ids.len(),
        count = data.count.as_deref().unwrap_or("unknown"),
        "Parsed ESearch id list"
    );

    Ok(ids)
}
