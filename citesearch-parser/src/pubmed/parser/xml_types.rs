//! EFetch XML schema types for serde deserialization
//!
//! Only the elements that feed a [`CitationRecord`] are modelled. Everything
//! else in a `PubmedArticle` (MeSH headings, chemicals, history dates) is ignored
//! by the deserializer.

use serde::Deserialize;

use crate::models::CitationRecord;

/// Element whose only content of interest is its text
///
/// Attributes such as `PMID/@Version` or `AbstractText/@Label` are ignored.
#[derive(Debug, Deserialize, Default)]
pub(super) struct TextNode {
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl TextNode {
    fn trimmed(&self) -> Option<&str> {
        let text = self.value.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: Option<MedlineCitationXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MedlineCitationXml {
    #[serde(rename = "PMID")]
    pub pmid: Option<TextNode>,
    #[serde(rename = "Article")]
    pub article: Option<ArticleXml>,
    #[serde(rename = "KeywordList", default)]
    pub keyword_lists: Vec<KeywordListXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "Journal")]
    pub journal: Option<JournalXml>,
    #[serde(rename = "ArticleTitle")]
    pub title: Option<TextNode>,
    #[serde(rename = "Abstract")]
    pub abstract_xml: Option<AbstractXml>,
    #[serde(rename = "AuthorList")]
    pub author_list: Option<AuthorListXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalXml {
    #[serde(rename = "Title")]
    pub title: Option<TextNode>,
    #[serde(rename = "JournalIssue")]
    pub journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub pub_date: Option<PubDateXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PubDateXml {
    #[serde(rename = "Year")]
    pub year: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AbstractXml {
    #[serde(rename = "AbstractText", default)]
    pub texts: Vec<TextNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorListXml {
    #[serde(rename = "Author", default)]
    pub authors: Vec<AuthorXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorXml {
    #[serde(rename = "LastName")]
    pub last_name: Option<TextNode>,
    #[serde(rename = "ForeName", alias = "FirstName")]
    pub fore_name: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct KeywordListXml {
    #[serde(rename = "Keyword", default)]
    pub keywords: Vec<TextNode>,
}

impl AuthorXml {
    /// "Last First", or `None` unless both parts are present
    fn display_name(&self) -> Option<String> {
        let last = self.last_name.as_ref()?.trimmed()?;
        let first = self.fore_name.as_ref()?.trimmed()?;
        Some(format!("{last} {first}"))
    }
}

impl PubmedArticleXml {
    /// Convert into a record; `None` when the mandatory PMID is missing
    pub fn into_record(self) -> Option<CitationRecord> {
        let citation = self.medline_citation?;
        let id = citation.pmid.as_ref()?.trimmed()?.to_string();

        let mut record = CitationRecord::new(id);

        if let Some(article) = citation.article {
            if let Some(title) = article.title.as_ref().and_then(TextNode::trimmed) {
                record.title = title.to_string();
            }

            record.abstract_text = article
                .abstract_xml
                .as_ref()
                .and_then(|a| a.texts.first())
                .and_then(TextNode::trimmed)
                .unwrap_or_default()
                .to_string();

            record.authors = article
                .author_list
                .map(|list| {
                    list.authors
                        .iter()
                        .filter_map(AuthorXml::display_name)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();

            if let Some(journal) = article.journal {
                record.journal = journal
                    .title
                    .as_ref()
                    .and_then(TextNode::trimmed)
                    .unwrap_or_default()
                    .to_string();

                // MedlineDate ("1998 Dec-1999 Jan") is not consulted
                record.publication_year = journal
                    .journal_issue
                    .and_then(|issue| issue.pub_date)
                    .and_then(|date| date.year)
                    .as_ref()
                    .and_then(TextNode::trimmed)
                    .filter(|year| is_four_digit_year(year))
                    .unwrap_or_default()
                    .to_string();
            }
        }

        record.keywords = citation
            .keyword_lists
            .iter()
            .flat_map(|list| list.keywords.iter())
            .filter_map(TextNode::trimmed)
            .map(str::to_string)
            .collect();

        Some(record)
    }
}

fn is_four_digit_year(value: &str) -> bool {
    value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit())
}
