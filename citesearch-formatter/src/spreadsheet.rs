//! Spreadsheet (CSV) export and read-back
//!
//! Columns follow [`CitationRecord`] field order. List fields (authors,
//! keywords) are joined into one cell with [`LIST_SEPARATOR`]; a literal `;`
//! or `\` inside an item is escaped with a backslash so the cell splits back
//! into the same items.

use citesearch_parser::CitationRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ExportError, Result};

pub const CSV_HEADER: [&str; 7] = [
    "id",
    "title",
    "abstract",
    "authors",
    "journal",
    "publication_year",
    "keywords",
];

pub const LIST_SEPARATOR: &str = "; ";

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    id: String,
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    authors: String,
    journal: String,
    publication_year: String,
    keywords: String,
}

impl From<&CitationRecord> for CsvRow {
    fn from(record: &CitationRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            abstract_text: record.abstract_text.clone(),
            authors: join_list(&record.authors),
            journal: record.journal.clone(),
            publication_year: record.publication_year.clone(),
            keywords: join_list(&record.keywords),
        }
    }
}

fn join_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| {
            let mut escaped = String::with_capacity(item.len());
            for c in item.chars() {
                if c == '\\' || c == ';' {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped
        })
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Inverse of [`join_list`]; items are trimmed and blank items dropped
fn split_list(cell: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = cell.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => current.push(chars.next().unwrap_or('\\')),
            ';' => push_item(&mut items, &mut current),
            _ => current.push(c),
        }
    }
    push_item(&mut items, &mut current);

    items
}

fn push_item(items: &mut Vec<String>, current: &mut String) {
    let item = current.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
    current.clear();
}

impl From<CsvRow> for CitationRecord {
    fn from(row: CsvRow) -> Self {
        CitationRecord {
            id: row.id,
            title: row.title,
            abstract_text: row.abstract_text,
            authors: split_list(&row.authors),
            journal: row.journal,
            publication_year: row.publication_year,
            keywords: split_list(&row.keywords),
        }
    }
}

/// Write records as UTF-8 CSV bytes, header first
///
/// The header is written even when `records` is empty.
///
/// ```
/// use citesearch_formatter::records_to_csv;
/// use citesearch_parser::CitationRecord;
///
/// let mut record = CitationRecord::new("1");
/// record.authors = vec!["Doe Jane".into(), "Roe Rick".into()];
///
/// let csv = String::from_utf8(records_to_csv(&[record])?).unwrap();
/// assert_eq!(
///     csv,
///     "id,title,abstract,authors,journal,publication_year,keywords\n\
///      1,No title available,,Doe Jane; Roe Rick,,,\n"
/// );
/// # Ok::<(), citesearch_formatter::ExportError>(())
/// ```
#[instrument(skip(records), fields(records = records.len()))]
pub fn records_to_csv(records: &[CitationRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;

    debug!(bytes = bytes.len(), "CSV export written");
    Ok(bytes)
}

/// Read records back from CSV produced by [`records_to_csv`]
pub fn records_from_csv(data: &[u8]) -> Result<Vec<CitationRecord>> {
    let mut reader = csv::Reader::from_reader(data);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(ExportError::UnexpectedHeader {
            expected: CSV_HEADER.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(CitationRecord::from).map_err(ExportError::from))
        .collect()
}
