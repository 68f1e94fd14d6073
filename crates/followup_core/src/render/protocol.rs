//! Protocol document renderer.
//!
//! # Responsibility
//! - Assemble title, meta and the four numbered sections into plain text.
//! - Apply emphasis/strikethrough markup per line.
//! - Produce the Markdown-safe variant of the same text.
//!
//! # Invariants
//! - Section order is fixed: participants, topics, decisions, tasks.
//! - An empty section renders exactly one localized `(empty)` line.
//! - Markup never wraps a numbering/bullet prefix.

use crate::i18n::{Locale, Translator};
use crate::model::document::Document;
use crate::tasks::resolver::TaskResolver;
use crate::text::topics::normalize_topic;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*(?:-\s+|[0-9]+(?:\.[0-9]+)?\.\s+))(.*)$").expect("valid line prefix regex")
});
static LIST_TERMINATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;:]+\s*$").expect("valid list terminator regex"));
static DECISION_TERMINATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;:]+\s*$").expect("valid decision terminator regex"));
static ORDERED_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*[0-9]+)\.").expect("valid ordered prefix regex"));

const DATE_PLACEHOLDER: &str = "YYYY-MM-DD";
const CHECKBOX_DONE: &str = "[v]";
const CHECKBOX_OPEN: &str = "[ ]";

/// Renders protocol text for one locale and task resolver.
pub struct ProtocolRenderer<'a> {
    translator: &'a dyn Translator,
    locale: Locale,
    resolver: &'a TaskResolver,
}

impl<'a> ProtocolRenderer<'a> {
    pub fn new(translator: &'a dyn Translator, locale: Locale, resolver: &'a TaskResolver) -> Self {
        Self {
            translator,
            locale,
            resolver,
        }
    }

    fn t(&self, key: &str) -> String {
        self.translator.t(key, &[])
    }

    /// Plain protocol text.
    pub fn generate_text(&self, doc: &Document) -> String {
        let mut lines: Vec<String> = Vec::new();

        let date = if doc.meeting_date.is_empty() {
            DATE_PLACEHOLDER.to_string()
        } else {
            doc.meeting_date.clone()
        };
        let title = if doc.meeting_title.is_empty() {
            self.t("common.untitled")
        } else {
            doc.meeting_title.clone()
        };
        lines.push(emphasize_line(&format!("{date} {title}")));
        if !doc.meta.is_empty() {
            lines.push(emphasize_line(&doc.meta));
        }
        lines.push(String::new());

        self.push_participants(doc, &mut lines);
        lines.push(String::new());
        self.push_topics(doc, &mut lines);
        lines.push(String::new());
        self.push_decisions(doc, &mut lines);
        lines.push(String::new());
        self.push_tasks(doc, &mut lines);
        lines.push(String::new());
        lines.push(self.t("protocol.footer"));

        lines.join("\n")
    }

    /// Protocol text with ordered-list numerals escaped and hard line breaks.
    pub fn generate_markdown_text(&self, doc: &Document) -> String {
        self.generate_text(doc)
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    return String::new();
                }
                format!("{}  ", ORDERED_PREFIX_RE.replace(line, r"${1}\."))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Localized due date for the tasks section.
    pub fn format_due_date(&self, due: &str) -> String {
        if due.is_empty() {
            return self.t("common.noDue");
        }
        match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
            Ok(date) => self.locale.format_medium_date(date),
            Err(_) => due.to_string(),
        }
    }

    fn push_participants(&self, doc: &Document, lines: &mut Vec<String>) {
        lines.push(format!("1. {}:", self.t("protocol.participants")));
        if doc.participants.is_empty() {
            lines.push(format!("- {}", self.t("common.empty")));
        }
        let last = doc.participants.len().saturating_sub(1);
        for (index, item) in doc.participants.iter().enumerate() {
            if let Some(rendered) = format_list_item(&item.text, index == last) {
                lines.push(emphasize_line(&format!("- {rendered}")));
            }
        }
    }

    fn push_topics(&self, doc: &Document, lines: &mut Vec<String>) {
        lines.push(format!("2. {}:", self.t("protocol.topics")));
        if doc.topics.is_empty() {
            lines.push(format!("2.1. {}", self.t("common.empty")));
        }
        for (index, item) in doc.topics.iter().enumerate() {
            let topic = normalize_topic(&item.text);
            let title = LIST_TERMINATOR_RE.replace(&topic.main, "");
            let title = title.trim();
            let suffix = if title.ends_with('!') {
                ""
            } else if topic.bullets.is_empty() {
                "."
            } else {
                ":"
            };
            lines.push(emphasize_line(&format!("2.{}. {title}{suffix}", index + 1)));

            let last = topic.bullets.len().saturating_sub(1);
            for (bullet_index, bullet) in topic.bullets.iter().enumerate() {
                if let Some(rendered) = format_list_item(bullet, bullet_index == last) {
                    lines.push(emphasize_line(&format!("  - {rendered}")));
                }
            }
            if !topic.bullets.is_empty() && index + 1 < doc.topics.len() {
                lines.push(String::new());
            }
        }
    }

    fn push_decisions(&self, doc: &Document, lines: &mut Vec<String>) {
        lines.push(format!("3. {}:", self.t("protocol.decisions")));
        if doc.decisions.is_empty() {
            lines.push(format!("3.1. {}", self.t("common.empty")));
        }
        for (index, item) in doc.decisions.iter().enumerate() {
            if let Some(rendered) = format_decision(&item.text) {
                lines.push(emphasize_line(&format!("3.{}. {rendered}", index + 1)));
            }
        }
    }

    fn push_tasks(&self, doc: &Document, lines: &mut Vec<String>) {
        let tasks = self.resolver.resolve_document_tasks(doc);
        lines.push(format!("4. {}:", self.t("protocol.tasks")));
        if tasks.is_empty() {
            lines.push(format!("4.1. {}", self.t("common.empty")));
        }
        for (index, task) in tasks.iter().enumerate() {
            let status = if task.completed {
                CHECKBOX_DONE
            } else {
                CHECKBOX_OPEN
            };
            let assignee = if task.assignee.is_empty() {
                self.t("common.unassigned")
            } else {
                task.assignee.clone()
            };
            let line = format!(
                "4.{}. {status} {} — {assignee}, {}",
                index + 1,
                task.title,
                self.format_due_date(&task.due)
            );
            let line = if task.completed {
                strike_line(&line)
            } else {
                line
            };
            lines.push(emphasize_line(&line));
        }
    }
}

/// Wraps the content after any numbering/bullet prefix in `~~`.
pub fn strike_line(line: &str) -> String {
    wrap_content(line, "~~")
}

/// Wraps lines containing `!` in `*` (or `**` when `!!` appears).
pub fn emphasize_line(line: &str) -> String {
    if !line.contains('!') {
        return line.to_string();
    }
    let marker = if line.contains("!!") { "**" } else { "*" };
    wrap_content(line, marker)
}

fn wrap_content(line: &str, marker: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    if let Some(caps) = LINE_PREFIX_RE.captures(line) {
        let content = &caps[2];
        if content.trim().is_empty() {
            return line.to_string();
        }
        return format!("{}{marker}{content}{marker}", &caps[1]);
    }
    format!("{marker}{line}{marker}")
}

/// Terminates a list item with `;`, or `.` for the last one.
///
/// Items ending in `!` keep their ending; items empty after stripping are
/// skipped.
pub fn format_list_item(text: &str, is_last: bool) -> Option<String> {
    let trimmed = LIST_TERMINATOR_RE.replace(text.trim(), "");
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with('!') {
        return Some(trimmed.into_owned());
    }
    let terminator = if is_last { "." } else { ";" };
    Some(format!("{trimmed}{terminator}"))
}

/// Ensures a decision ends in `.`, `!` or `?`.
pub fn format_decision(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with(['!', '?', '.']) {
        return Some(trimmed.to_string());
    }
    Some(format!("{}.", DECISION_TERMINATOR_RE.replace(trimmed, "")))
}
