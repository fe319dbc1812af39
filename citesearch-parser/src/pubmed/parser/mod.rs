//! EFetch XML parsing
//!
//! An EFetch response is handled in two passes. A streaming `quick_xml::Reader`
//! first checks that the document is well-formed and cuts it into one slice per
//! `PubmedArticle`; each slice is then deserialized on its own with
//! `quick_xml::de`. A slice that fails to deserialize, or that has no PMID, is
//! logged and skipped while the rest of the batch is still returned.
//!
//! # Module Organization
//!
//! - `preprocessing` - strip inline formatting tags before parsing
//! - `xml_types` - serde schema types and conversion into [`CitationRecord`]

mod preprocessing;
mod xml_types;

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::name::QName;
use tracing::{debug, instrument, warn};

use crate::error::{ParseError, Result};
use crate::models::CitationRecord;
use preprocessing::strip_inline_html_tags;
use xml_types::PubmedArticleXml;

const ARTICLE_SET_TAG: &[u8] = b"PubmedArticleSet";
const ARTICLE_TAG: &[u8] = b"PubmedArticle";
const ARTICLE_OPEN: &str = "<PubmedArticle";

/// Parse every article of an EFetch XML response into citation records
///
/// Records come back in document order. Per-article problems never fail the
/// call:
///
/// - an article without a `PMID` is skipped
/// - an article whose sub-tree cannot be deserialized is skipped
/// - a PMID seen earlier in the same document is skipped
///
/// # Errors
///
/// Returns [`ParseError::XmlError`] when the document itself is not well-formed
/// XML or has no `PubmedArticleSet` root.
///
/// # Example
///
/// ```
/// use citesearch_parser::pubmed::parse_articles;
///
/// let xml = r#"<?xml version="1.0"?>
/// <PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <Article>
///         <Journal><Title>Example Journal</Title></Journal>
///         <ArticleTitle>Example Article</ArticleTitle>
///       </Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let records = parse_articles(xml)?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].journal, "Example Journal");
/// # Ok::<(), citesearch_parser::ParseError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_articles(xml: &str) -> Result<Vec<CitationRecord>> {
    let cleaned_xml = strip_inline_html_tags(xml);
    let nodes = split_article_nodes(&cleaned_xml)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(nodes.len());

    for (position, node) in nodes.into_iter().enumerate() {
        let article: PubmedArticleXml = match from_str(node) {
            Ok(article) => article,
            Err(e) => {
                warn!(position, error = %e, "Failed to parse article, skipping");
                continue;
            }
        };

        let Some(record) = article.into_record() else {
            warn!(position, "Article has no PMID, skipping");
            continue;
        };

        if !seen.insert(record.id.clone()) {
            debug!(pmid = %record.id, "Duplicate PMID in batch, keeping first occurrence");
            continue;
        }

        records.push(record);
    }

    debug!(records = records.len(), "Parsed EFetch batch");
    Ok(records)
}

/// Cut a well-formed EFetch document into one slice per `PubmedArticle` element
fn split_article_nodes(xml: &str) -> Result<Vec<&str>> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();
    let mut has_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                ARTICLE_SET_TAG => has_root = true,
                ARTICLE_TAG => {
                    let start = article_start(xml, reader.buffer_position() as usize)?;
                    reader
                        .read_to_end(QName(ARTICLE_TAG))
                        .map_err(|err| xml_error(&reader, err))?;
                    nodes.push(&xml[start..reader.buffer_position() as usize]);
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                ARTICLE_SET_TAG => has_root = true,
                ARTICLE_TAG => {
                    let end = reader.buffer_position() as usize;
                    nodes.push(&xml[article_start(xml, end)?..end]);
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(xml_error(&reader, err)),
            _ => {}
        }
    }

    if !has_root {
        return Err(ParseError::XmlError(
            "missing <PubmedArticleSet> root element".to_string(),
        ));
    }

    Ok(nodes)
}

/// Byte offset of the `<PubmedArticle` tag that ends at `tag_end`
fn article_start(xml: &str, tag_end: usize) -> Result<usize> {
    xml[..tag_end].rfind(ARTICLE_OPEN).ok_or_else(|| {
        ParseError::XmlError(format!("cannot locate article start before byte {tag_end}"))
    })
}

fn xml_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> ParseError {
    ParseError::XmlError(format!(
        "malformed XML at byte {}: {}",
        reader.error_position(),
        err
    ))
}
