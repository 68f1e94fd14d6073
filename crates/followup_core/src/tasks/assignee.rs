//! `@name` assignee detection inside free text.
//!
//! # Invariants
//! - A tag starts at the beginning of the line or after whitespace.
//! - A known participant name only matches when followed by a boundary
//!   character, so `@Al` never matches inside `@Alexander`.
//! - Any known-name match beats generic tags; among each kind the right-most
//!   occurrence wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TAG_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)@").expect("valid tag start regex"));
static GENERIC_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(@[\p{L}\p{N}_]+)").expect("valid generic tag regex"));

/// An assignee tag located within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeMatch {
    /// `@name`, using the participant's spelling for known names.
    pub value: String,
    /// Byte offset of the `@`.
    pub start: usize,
    /// Byte offset one past the matched name.
    pub end: usize,
}

/// Whitespace, common punctuation, brackets, quotes, or end of text.
pub fn is_assignee_boundary(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(c) => {
            c.is_whitespace()
                || matches!(
                    c,
                    ',' | '.' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}'
                        | '"' | '\'' | '`' | '«' | '»'
                )
        }
    }
}

/// Finds the assignee tag of a line.
pub fn find_last_assignee_tag(text: &str, participant_names: &[String]) -> Option<AssigneeMatch> {
    let names = prepare_names(participant_names);

    let mut exact = None;
    for tag in TAG_START_RE.find_iter(text) {
        let at_start = tag.end() - 1;
        let after_at = &text[tag.end()..];
        let matched = names
            .iter()
            .find_map(|name| match_name_prefix(after_at, name).map(|len| (name, len)));
        if let Some((name, len)) = matched {
            exact = Some(AssigneeMatch {
                value: format!("@{name}"),
                start: at_start,
                end: tag.end() + len,
            });
        }
    }
    if exact.is_some() {
        return exact;
    }

    GENERIC_TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .last()
        .map(|tag| AssigneeMatch {
            value: tag.as_str().to_string(),
            start: tag.start(),
            end: tag.end(),
        })
}

/// Trimmed, de-duplicated names, longest first (stable for equal lengths).
fn prepare_names(participant_names: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut names: Vec<&str> = participant_names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .collect();
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    names
}

/// Returns the byte length of `name` at the start of `text` when it matches
/// case-insensitively and ends on a boundary.
fn match_name_prefix(text: &str, name: &str) -> Option<usize> {
    let name_chars = name.chars().count();
    let head_len = text
        .char_indices()
        .nth(name_chars)
        .map_or(text.len(), |(index, _)| index);
    let head = &text[..head_len];
    if head.chars().count() != name_chars || head.to_lowercase() != name.to_lowercase() {
        return None;
    }
    if !is_assignee_boundary(text[head_len..].chars().next()) {
        return None;
    }
    Some(head_len)
}

#[cfg(test)]
mod tests {
    use super::{find_last_assignee_tag, match_name_prefix};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn right_most_known_name_wins() {
        let found = find_last_assignee_tag(
            "fix bug @Alice then @Bob due 2024-05-01",
            &names(&["Alice", "Bob"]),
        )
        .unwrap();
        assert_eq!(found.value, "@Bob");
        assert_eq!(found.start, 20);
        assert_eq!(found.end, 24);
    }

    #[test]
    fn known_name_beats_later_generic_tag() {
        let found =
            find_last_assignee_tag("@alice to ask @someone", &names(&["Alice"])).unwrap();
        assert_eq!(found.value, "@Alice");
        assert_eq!(found.start, 0);
    }

    #[test]
    fn prefix_names_need_a_boundary() {
        let found =
            find_last_assignee_tag("ping @Alexander tomorrow", &names(&["Al"])).unwrap();
        assert_eq!(found.value, "@Alexander");
    }

    #[test]
    fn multi_word_names_are_tried_first() {
        let found = find_last_assignee_tag(
            "call @Anna Maria, today",
            &names(&["Anna", "Anna Maria"]),
        )
        .unwrap();
        assert_eq!(found.value, "@Anna Maria");
        assert_eq!(&"call @Anna Maria, today"[found.start..found.end], "@Anna Maria");
    }

    #[test]
    fn tag_must_follow_whitespace() {
        assert_eq!(find_last_assignee_tag("mail me at a@b.c", &[]), None);
        assert_eq!(find_last_assignee_tag("stray @ sign", &[]), None);
    }

    #[test]
    fn generic_tags_accept_unicode_letters() {
        let found = find_last_assignee_tag("позвонить @Иван_2", &[]).unwrap();
        assert_eq!(found.value, "@Иван_2");
    }

    #[test]
    fn name_prefix_is_case_insensitive() {
        assert_eq!(match_name_prefix("BOB, later", "bob"), Some(3));
        assert_eq!(match_name_prefix("Bobby", "Bob"), None);
        assert_eq!(match_name_prefix("Bo", "Bob"), None);
    }
}
