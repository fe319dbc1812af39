//! XML preprocessing applied before EFetch documents are split and deserialized

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Strip inline formatting tags from XML content
///
/// Handles tags like `<i>`, `<sup>`, `<sub>`, `<b>`, `<u>` (with or without
/// attributes) and MathML `mml:*` elements that can appear in `AbstractText`
/// and `ArticleTitle`. Left in place they turn a text-only element into mixed
/// content, which the serde deserializer rejects. Only the tags go; their text
/// stays.
///
/// ```ignore
/// let xml = "<AbstractText>CO<sup>2</sup> levels</AbstractText>";
/// assert_eq!(strip_inline_html_tags(xml), "<AbstractText>CO2 levels</AbstractText>");
/// ```
pub(crate) fn strip_inline_html_tags(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|sc|em|strong|italic|bold|mml:[A-Za-z]+)(?:\s[^>]*)?/?>")
            .expect("inline tag pattern is a valid regex")
    });

    let cleaned = re.replace_all(xml, "");

    if cleaned.len() != xml.len() {
        debug!(
            original_bytes = xml.len(),
            cleaned_bytes = cleaned.len(),
            "Stripped inline formatting tags"
        );
    }

    cleaned.into_owned()
}
