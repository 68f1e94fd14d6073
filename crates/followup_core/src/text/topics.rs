//! Topics field normalizer.
//!
//! Topics are separated by blank lines. The first line of a block is the
//! title, the following lines are its bullets (one nesting level only).

use super::{has_user_content, stitch_comma_breaks, strip_list_prefix, NUMERIC_PREFIX_RE};
use crate::model::document::{NormalizedTopic, Topic};
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid block separator regex"));
static TRAILING_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,:;\s]+$").expect("valid trailing punctuation regex"));
static LEADING_DASHES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-+\s*").expect("valid leading dashes regex"));

/// Parses the raw topics field into one topic per blank-line separated block.
pub fn collect_topics_from_input(raw_text: &str) -> Vec<Topic> {
    let normalized = stitch_comma_breaks(&raw_text.replace('\r', ""));
    BLOCK_SEPARATOR_RE
        .split(&normalized)
        .filter_map(parse_topic_block)
        .collect()
}

/// Splits a stored topic on its first colon into title and bullets.
///
/// A topic without bullets keeps its bare title; no colon is forced.
pub fn normalize_topic(text: &str) -> NormalizedTopic {
    let line = text.trim();
    let Some((main, details)) = line.split_once(':') else {
        return NormalizedTopic {
            main: line.to_string(),
            bullets: Vec::new(),
        };
    };

    let bullets: Vec<String> = details
        .replace('\r', "")
        .split('\n')
        .flat_map(|part| part.split(';'))
        .map(|value| LEADING_DASHES_RE.replace(value.trim(), "").trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    let main = main.trim();
    if bullets.is_empty() {
        return NormalizedTopic {
            main: main.to_string(),
            bullets,
        };
    }
    NormalizedTopic {
        main: format!("{main}:"),
        bullets,
    }
}

/// Renders topics back into block-per-topic input text.
///
/// Stored text is read line by line: the first line is the title, the rest are
/// bullets. Inline `:` and `;` are left as typed.
pub fn render_topics_to_input(topics: &[Topic]) -> String {
    topics
        .iter()
        .map(|topic| render_topic_block(&topic.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_topic_block(text: &str) -> String {
    let mut lines = text.split('\n').map(str::trim).filter(|line| !line.is_empty());
    let title = lines.next().map(clean_topic_title).unwrap_or_default();
    let bullets: Vec<String> = lines.map(clean_bullet).filter(|line| !line.is_empty()).collect();
    if bullets.is_empty() {
        return format!("{title}.");
    }
    let last = bullets.len() - 1;
    let bullets: Vec<String> = bullets
        .iter()
        .enumerate()
        .map(|(index, bullet)| {
            let punct = if index == last { "." } else { ";" };
            format!("- {bullet}{punct}")
        })
        .collect();
    format!("{title}:\n{}", bullets.join("\n"))
}

fn parse_topic_block(block: &str) -> Option<Topic> {
    let mut lines = block.split('\n').map(str::trim).filter(|line| !line.is_empty());

    let title = clean_topic_title(lines.next()?);
    if !has_user_content(&title) {
        return None;
    }

    let bullets: Vec<String> = lines
        .map(clean_bullet)
        .filter(|line| has_user_content(line))
        .collect();

    if bullets.is_empty() {
        return Some(Topic::new(title));
    }
    Some(Topic::new(format!("{title}:\n{}", bullets.join("\n"))))
}

fn clean_topic_title(line: &str) -> String {
    let without_number = NUMERIC_PREFIX_RE.replace(line.trim(), "");
    TRAILING_PUNCT_RE
        .replace(&without_number, "")
        .trim()
        .to_string()
}

fn clean_bullet(line: &str) -> String {
    let stripped = strip_list_prefix(line.trim());
    TRAILING_PUNCT_RE.replace(&stripped, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{collect_topics_from_input, normalize_topic, render_topics_to_input};
    use crate::model::document::Topic;

    #[test]
    fn blocks_become_topics_with_bullets() {
        let topics = collect_topics_from_input("1. Budget:\n- hosting;\n- travel.\n\nHiring");
        assert_eq!(
            topics,
            vec![Topic::new("Budget:\nhosting\ntravel"), Topic::new("Hiring")]
        );
    }

    #[test]
    fn block_without_usable_title_is_dropped() {
        assert!(collect_topics_from_input("--\n- orphan bullet").is_empty());
    }

    #[test]
    fn normalize_topic_splits_on_first_colon() {
        let topic = normalize_topic("Budget:\nhosting\ntravel; food");
        assert_eq!(topic.main, "Budget:");
        assert_eq!(topic.bullets, vec!["hosting", "travel", "food"]);
    }

    #[test]
    fn trailing_colon_without_bullets_keeps_bare_title() {
        let topic = normalize_topic("Budget:");
        assert_eq!(topic.main, "Budget");
        assert!(topic.bullets.is_empty());
    }

    #[test]
    fn render_places_colon_only_with_bullets() {
        let rendered = render_topics_to_input(&[
            Topic::new("Budget:\nhosting\ntravel"),
            Topic::new("Hiring"),
        ]);
        assert_eq!(rendered, "Budget:\n- hosting;\n- travel.\n\nHiring.");
    }

    #[test]
    fn render_keeps_inline_colon_and_semicolon() {
        let topics = collect_topics_from_input("Time: 10am\n\nBudget\n- hosting; travel");
        assert_eq!(
            topics,
            vec![Topic::new("Time: 10am"), Topic::new("Budget:\nhosting; travel")]
        );

        let rendered = render_topics_to_input(&topics);
        assert_eq!(rendered, "Time: 10am.\n\nBudget:\n- hosting; travel.");
        assert_eq!(collect_topics_from_input(&rendered), topics);
    }
}
