//! Export tests over realistic search results

use citesearch_formatter::{
    ExportError, records_from_csv, records_to_bibtex, records_to_csv, records_to_ris,
};
use citesearch_parser::CitationRecord;
use rstest::{fixture, rstest};

#[fixture]
fn result_set() -> Vec<CitationRecord> {
    vec![
        CitationRecord {
            id: "31978945".to_string(),
            title: "A pneumonia outbreak associated with a new coronavirus of probable bat origin."
                .to_string(),
            abstract_text: "Since the outbreak of SARS 18 years ago, a large number of \
                SARS-related coronaviruses have been discovered in bats.\nMulti-line, \"quoted\"."
                .to_string(),
            authors: vec!["Zhou Peng".to_string(), "Shi Zheng-Li".to_string()],
            journal: "Nature".to_string(),
            publication_year: "2020".to_string(),
            keywords: vec!["SARS-CoV-2".to_string(), "bat origin".to_string()],
        },
        CitationRecord::new("100"),
        CitationRecord {
            id: "24635773".to_string(),
            title: "A randomized trial of protocol-based care for early septic shock.".to_string(),
            authors: vec!["Yealy Donald M".to_string()],
            journal: "The New England journal of medicine".to_string(),
            publication_year: "2014".to_string(),
            ..CitationRecord::new("24635773")
        },
    ]
}

#[rstest]
fn test_csv_roundtrip_preserves_rows_and_fields(result_set: Vec<CitationRecord>) {
    let bytes = records_to_csv(&result_set).unwrap();
    let restored = records_from_csv(&bytes).unwrap();

    assert_eq!(restored.len(), result_set.len());
    assert_eq!(restored, result_set);
}

#[rstest]
fn test_csv_header_and_column_order(result_set: Vec<CitationRecord>) {
    let bytes = records_to_csv(&result_set).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id,title,abstract,authors,journal,publication_year,keywords")
    );
    assert!(text.contains("Zhou Peng; Shi Zheng-Li"));
    assert!(text.contains("SARS-CoV-2; bat origin"));
}

#[rstest]
#[case::semicolon_in_keyword(vec!["COVID-19; vaccine", "x"], vec!["Doe Jane"])]
#[case::semicolon_in_author(vec!["asthma"], vec!["Study Group; Writing Committee", "Roe Rick"])]
#[case::backslash(vec![r"C:\data\", r"\;"], vec![])]
fn test_csv_roundtrip_keeps_list_items_with_separators(
    #[case] keywords: Vec<&str>,
    #[case] authors: Vec<&str>,
) {
    let record = CitationRecord {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        authors: authors.iter().map(|a| a.to_string()).collect(),
        ..CitationRecord::new("35000001")
    };

    let bytes = records_to_csv(std::slice::from_ref(&record)).unwrap();
    let restored = records_from_csv(&bytes).unwrap();

    assert_eq!(restored, vec![record]);
}

#[rstest]
#[case::empty_input(&[])]
fn test_empty_roundtrip(#[case] records: &[CitationRecord]) {
    let bytes = records_to_csv(records).unwrap();
    assert!(records_from_csv(&bytes).unwrap().is_empty());
}

#[test]
fn test_truncated_row_is_an_error() {
    let data = b"id,title,abstract,authors,journal,publication_year,keywords\n1,only two\n";
    assert!(matches!(records_from_csv(data), Err(ExportError::Csv(_))));
}

#[rstest]
fn test_citation_exports_cover_every_record(result_set: Vec<CitationRecord>) {
    let ris = records_to_ris(&result_set);
    assert_eq!(ris.matches("TY  - JOUR").count(), 3);
    assert_eq!(ris.matches("ER  - ").count(), 3);

    let bibtex = records_to_bibtex(&result_set);
    assert_eq!(bibtex.matches("@article{").count(), 3);
    assert!(bibtex.contains("@article{Zhou2020_pmid31978945,"));
    assert!(bibtex.contains("@article{Yealy2014_pmid24635773,"));
}
