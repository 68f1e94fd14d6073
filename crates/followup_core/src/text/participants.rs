//! Participants field normalizer.
//!
//! Accepts comma/semicolon separated names, one-per-line lists, and inline
//! numbering such as `1. Alice 2. Bob`.

use super::{has_user_content, stitch_comma_breaks, BULLET_PREFIX_RE, NUMERIC_PREFIX_RE};
use crate::model::document::TextItem;
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,]+").expect("valid separator regex"));
static INLINE_NUMBERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)[0-9]+\.\s+").expect("valid inline numbering regex"));
static LETTER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-ЯA-Z]\)\s*").expect("valid letter prefix regex"));
static TRAILING_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;:,\s]+$").expect("valid trailing punctuation regex"));

/// Parses the raw participants field into one item per person.
pub fn collect_participants_from_input(raw_text: &str) -> Vec<TextItem> {
    let stitched = stitch_comma_breaks(raw_text).replace('\r', "\n");
    let separated = SEPARATOR_RE.replace_all(&stitched, "\n");
    let split = INLINE_NUMBERING_RE.replace_all(&separated, "\n");

    split
        .split('\n')
        .map(clean_participant_token)
        .filter(|token| has_user_content(token))
        .map(TextItem::new)
        .collect()
}

/// Renders participants back into one-per-line input text.
pub fn render_participants_to_input(participants: &[TextItem]) -> String {
    participants
        .iter()
        .map(|item| item.text.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn clean_participant_token(token: &str) -> String {
    let token = token.trim();
    let token = BULLET_PREFIX_RE.replace(token, "");
    let token = NUMERIC_PREFIX_RE.replace(&token, "");
    let token = LETTER_PREFIX_RE.replace(&token, "");
    let token = TRAILING_PUNCT_RE.replace(&token, "");
    token.trim().to_string()
}
