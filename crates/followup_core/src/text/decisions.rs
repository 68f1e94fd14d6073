//! Decisions field normalizer: one decision per line.

use super::{has_user_content, stitch_comma_breaks, strip_list_prefix};
use crate::model::document::TextItem;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;:]+\s*$").expect("valid trailing punctuation regex"));

/// Parses the raw decisions field, keeping lines with user content.
pub fn collect_decisions_from_input(raw_text: &str) -> Vec<TextItem> {
    stitch_comma_breaks(raw_text)
        .replace('\r', "")
        .split('\n')
        .map(|line| {
            let stripped = strip_list_prefix(line.trim());
            TRAILING_PUNCT_RE.replace(&stripped, "").trim().to_string()
        })
        .filter(|line| has_user_content(line))
        .map(TextItem::new)
        .collect()
}

/// Renders decisions back into one-per-line input text.
pub fn render_decisions_to_input(decisions: &[TextItem]) -> String {
    decisions
        .iter()
        .map(|item| item.text.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
