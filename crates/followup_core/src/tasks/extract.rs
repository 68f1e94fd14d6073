//! Auto-task extraction from free-text lines.
//!
//! # Responsibility
//! - Turn a line carrying an `@name` tag into a task with optional due date.
//! - Derive the task title by cutting the tag and date out of the line.
//!
//! # Invariants
//! - A line without an assignee tag never yields a task.
//! - Extracted tasks are never completed and never have an empty title.

use super::assignee::find_last_assignee_tag;
use super::dates::find_last_due_date;
use crate::i18n::Locale;
use crate::model::document::Task;
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:-\s+|[0-9]+(?:\.[0-9]+)*\.\s+)").expect("valid line marker regex")
});
static REPEATED_WS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("valid repeated whitespace regex"));
static WS_BEFORE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,;:.!?])").expect("valid whitespace before punctuation regex"));
static EDGE_SEPARATORS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s,;:.\-–—]+|[\s,;:.\-–—]+$").expect("valid edge separators regex")
});

/// Inputs shared by every line of one extraction pass.
#[derive(Debug, Clone, Copy)]
pub struct ExtractContext<'a> {
    pub locale: Locale,
    /// Year assumed for date tokens written without one.
    pub current_year: i32,
    /// Known participant names, current document and history.
    pub participant_names: &'a [String],
}

/// Extracts one auto-task from a line, if the line carries an assignee tag.
pub fn extract_auto_task_from_line(line: &str, ctx: &ExtractContext<'_>) -> Option<Task> {
    let normalized = LINE_MARKER_RE.replace(line.trim(), "");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    let assignee = find_last_assignee_tag(normalized, ctx.participant_names)?;
    let due = find_last_due_date(normalized, ctx.locale, ctx.current_year);

    let mut ranges = vec![(assignee.start, assignee.end)];
    if let Some(due) = &due {
        ranges.push((due.start, due.end));
    }

    let stripped = remove_ranges(normalized, &mut ranges);
    let title = clean_title(&stripped);
    let title = if title.is_empty() {
        normalized.to_string()
    } else {
        title
    };

    Some(Task {
        title,
        assignee: assignee.value,
        due: due.map(|found| found.iso).unwrap_or_default(),
        completed: false,
    })
}

/// Scans every line of every source text, in order.
pub fn extract_auto_tasks<'s>(
    sources: impl IntoIterator<Item = &'s str>,
    ctx: &ExtractContext<'_>,
) -> Vec<Task> {
    sources
        .into_iter()
        .flat_map(|chunk| chunk.split('\n'))
        .filter_map(|line| extract_auto_task_from_line(line, ctx))
        .collect()
}

/// Cuts byte ranges out of `text`; overlapping ranges are merged first.
fn remove_ranges(text: &str, ranges: &mut [(usize, usize)]) -> String {
    ranges.sort_unstable();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for &(start, end) in ranges.iter() {
        if start > cursor {
            out.push_str(&text[cursor..start]);
        }
        cursor = cursor.max(end);
    }
    out.push_str(&text[cursor.min(text.len())..]);
    out
}

fn clean_title(value: &str) -> String {
    let collapsed = REPEATED_WS_RE.replace_all(value, " ");
    let tightened = WS_BEFORE_PUNCT_RE.replace_all(&collapsed, "${1}");
    EDGE_SEPARATORS_RE
        .replace_all(&tightened, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{extract_auto_task_from_line, remove_ranges, ExtractContext};
    use crate::i18n::Locale;
    use crate::model::document::Task;

    fn ctx(names: &[String]) -> ExtractContext<'_> {
        ExtractContext {
            locale: Locale::Ru,
            current_year: 2024,
            participant_names: names,
        }
    }

    #[test]
    fn strips_tag_and_date_from_title() {
        let names = vec!["Bob".to_string()];
        let task = extract_auto_task_from_line("2.3. Send deck @bob, 15.05", &ctx(&names)).unwrap();
        assert_eq!(task, Task::new("Send deck", "@Bob", "2024-05-15"));
    }

    #[test]
    fn untagged_line_yields_nothing() {
        assert_eq!(extract_auto_task_from_line("Send deck 15.05", &ctx(&[])), None);
        assert_eq!(extract_auto_task_from_line("   ", &ctx(&[])), None);
    }

    #[test]
    fn falls_back_to_line_when_title_would_be_empty() {
        let task = extract_auto_task_from_line("- @dana — 01.06", &ctx(&[])).unwrap();
        assert_eq!(task.title, "@dana — 01.06");
        assert_eq!(task.assignee, "@dana");
        assert_eq!(task.due, "2024-06-01");
    }

    #[test]
    fn whitespace_before_punctuation_is_removed() {
        let task = extract_auto_task_from_line("Ask @kim , then close", &ctx(&[])).unwrap();
        assert_eq!(task.title, "Ask, then close");
    }

    #[test]
    fn remove_ranges_merges_overlaps() {
        let mut ranges = vec![(4, 8), (0, 2), (6, 10)];
        assert_eq!(remove_ranges("abcdefghijkl", &mut ranges), "cdkl");
    }
}
