//! Citation export formats for reference managers

use citesearch_parser::CitationRecord;

/// "Last First" to "Last, First"; single-word names are kept as-is
fn surname_first(author: &str) -> String {
    match author.split_once(' ') {
        Some((last, first)) => format!("{last}, {first}"),
        None => author.to_string(),
    }
}

/// Citation key from the first author's surname, the year and the PMID
fn generate_bibtex_key(record: &CitationRecord) -> String {
    let first_author = record
        .first_author()
        .and_then(|a| a.split_whitespace().next())
        .unwrap_or("Unknown");

    let year = if record.publication_year.is_empty() {
        "0000"
    } else {
        record.publication_year.as_str()
    };

    format!("{}{}_pmid{}", first_author, year, record.id)
}

fn escape_bibtex(s: &str) -> String {
    s.replace('&', r"\&")
        .replace('%', r"\%")
        .replace('_', r"\_")
        .replace('#', r"\#")
        .replace('{', r"\{")
        .replace('}', r"\}")
}

pub trait ExportFormat {
    fn to_bibtex(&self) -> String;

    fn to_ris(&self) -> String;
}

impl ExportFormat for CitationRecord {
    fn to_bibtex(&self) -> String {
        let key = generate_bibtex_key(self);
        let mut lines = Vec::new();

        lines.push(format!("@article{{{key},"));
        lines.push(format!("  title = {{{}}},", escape_bibtex(&self.title)));

        if !self.authors.is_empty() {
            let authors: Vec<String> = self
                .authors
                .iter()
                .map(|a| escape_bibtex(&surname_first(a)))
                .collect();
            lines.push(format!("  author = {{{}}},", authors.join(" and ")));
        }

        if !self.journal.is_empty() {
            lines.push(format!("  journal = {{{}}},", escape_bibtex(&self.journal)));
        }
        if !self.publication_year.is_empty() {
            lines.push(format!("  year = {{{}}},", self.publication_year));
        }
        if self.has_abstract() {
            lines.push(format!(
                "  abstract = {{{}}},",
                escape_bibtex(&self.abstract_text)
            ));
        }
        if !self.keywords.is_empty() {
            lines.push(format!(
                "  keywords = {{{}}},",
                escape_bibtex(&self.keywords.join(", "))
            ));
        }
        lines.push(format!("  pmid = {{{}}},", self.id));

        lines.push("}".to_string());
        lines.join("\n")
    }

    fn to_ris(&self) -> String {
        let mut lines = Vec::new();

        lines.push("TY  - JOUR".to_string());
        lines.push(format!("TI  - {}", self.title));

        for author in &self.authors {
            lines.push(format!("AU  - {}", surname_first(author)));
        }

        if !self.journal.is_empty() {
            lines.push(format!("JO  - {}", self.journal));
        }
        if !self.publication_year.is_empty() {
            lines.push(format!("PY  - {}", self.publication_year));
        }
        lines.push(format!("AN  - PMID:{}", self.id));
        if self.has_abstract() {
            lines.push(format!("AB  - {}", self.abstract_text));
        }
        for kw in &self.keywords {
            lines.push(format!("KW  - {kw}"));
        }

        lines.push("ER  - ".to_string());
        lines.join("\n")
    }
}

/// Export records as BibTeX entries separated by blank lines
pub fn records_to_bibtex(records: &[CitationRecord]) -> String {
    records
        .iter()
        .map(|r| r.to_bibtex())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn records_to_ris(records: &[CitationRecord]) -> String {
    records
        .iter()
        .map(|r| r.to_ris())
        .collect::<Vec<_>>()
        .join("\n")
}
