//! Document, task and text-item records.
//!
//! # Responsibility
//! - Define the form-to-document construction used on every edit.
//! - Provide raw-text fallbacks for records saved before raw snapshots existed.
//! - Provide the comparison snapshot used for unsaved-change detection.
//!
//! # Invariants
//! - `Document::from_form` re-derives every structured field from raw text.
//! - `meeting_title` is trimmed and capped at `MEETING_TITLE_MAX_CHARS`.
//! - `Task::due` is either empty or an ISO `yyyy-mm-dd` calendar date.

use crate::tasks::dates::parse_iso_date;
use crate::text::decisions::{collect_decisions_from_input, render_decisions_to_input};
use crate::text::participants::{collect_participants_from_input, render_participants_to_input};
use crate::text::topics::{collect_topics_from_input, render_topics_to_input};
use crate::text::normalize_raw_text;
use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum meeting title length in characters.
pub const MEETING_TITLE_MAX_CHARS: usize = 160;

/// Stable identifier of a stored document.
pub type DocumentId = String;

/// One normalized participant or decision line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One topic in raw normalized form: `"Title"` or `"Title:\nbullet\nbullet"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub text: String,
}

impl Topic {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Topic split into its title and one level of bullets.
///
/// `main` ends with `:` whenever `bullets` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTopic {
    pub main: String,
    pub bullets: Vec<String>,
}

/// Action item, either typed into a task row or inferred from free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub title: String,
    /// `@name` tag or free text; older records stored this as `owner`.
    #[serde(alias = "owner")]
    pub assignee: String,
    /// ISO `yyyy-mm-dd`, or empty when unscheduled.
    pub due: String,
    pub completed: bool,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        assignee: impl Into<String>,
        due: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            assignee: assignee.into(),
            due: due.into(),
            completed: false,
        }
    }

    /// De-duplication key: `title\0assignee\0due`.
    pub fn dedup_key(&self) -> String {
        format!("{}\u{0}{}\u{0}{}", self.title, self.assignee, self.due)
    }
}

/// Meeting protocol aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: DocumentId,
    pub meeting_date: String,
    pub meeting_title: String,
    pub meta: String,
    pub participants: Vec<TextItem>,
    pub topics: Vec<Topic>,
    pub decisions: Vec<TextItem>,
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decisions_raw: Option<String>,
    pub updated_at: String,
}

/// Editable task row as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRow {
    pub title: String,
    pub assignee: String,
    pub due: String,
    pub completed: bool,
}

/// Verbatim form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub id: Option<DocumentId>,
    pub meeting_date: String,
    pub meeting_title: String,
    pub meta: String,
    pub participants_raw: String,
    pub topics_raw: String,
    pub decisions_raw: String,
    pub tasks: Vec<TaskRow>,
}

/// Normalized view used to compare a draft against its stored copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub meeting_date: String,
    pub meeting_title: String,
    pub meta: String,
    pub participants_raw: String,
    pub topics_raw: String,
    pub decisions_raw: String,
    pub tasks: Vec<Task>,
}

impl Document {
    /// Builds a document snapshot from the current form state.
    ///
    /// Generates a fresh id when the form is not bound to a stored document.
    pub fn from_form(input: FormInput) -> Self {
        let id = input
            .id
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(new_document_id);
        let tasks = input
            .tasks
            .into_iter()
            .filter_map(|row| {
                let title = row.title.trim().to_string();
                if title.is_empty() {
                    return None;
                }
                Some(Task {
                    title,
                    assignee: row.assignee.trim().to_string(),
                    due: parse_iso_date(&row.due).unwrap_or_default(),
                    completed: row.completed,
                })
            })
            .collect();

        Self {
            id,
            meeting_date: input.meeting_date,
            meeting_title: input
                .meeting_title
                .trim()
                .chars()
                .take(MEETING_TITLE_MAX_CHARS)
                .collect(),
            meta: input.meta.trim().to_string(),
            participants: collect_participants_from_input(&input.participants_raw),
            topics: collect_topics_from_input(&input.topics_raw),
            decisions: collect_decisions_from_input(&input.decisions_raw),
            tasks,
            participants_raw: Some(input.participants_raw),
            topics_raw: Some(input.topics_raw),
            decisions_raw: Some(input.decisions_raw),
            updated_at: now_timestamp(),
        }
    }

    /// Raw participants text, or its reconstruction for older records.
    pub fn participants_input(&self) -> String {
        match &self.participants_raw {
            Some(raw) => raw.clone(),
            None => render_participants_to_input(&self.participants),
        }
    }

    /// Raw topics text, or its reconstruction for older records.
    pub fn topics_input(&self) -> String {
        match &self.topics_raw {
            Some(raw) => raw.clone(),
            None => render_topics_to_input(&self.topics),
        }
    }

    /// Raw decisions text, or its reconstruction for older records.
    pub fn decisions_input(&self) -> String {
        match &self.decisions_raw {
            Some(raw) => raw.clone(),
            None => render_decisions_to_input(&self.decisions),
        }
    }

    /// Converts the document back into editable form state.
    pub fn to_form(&self) -> FormInput {
        FormInput {
            id: Some(self.id.clone()),
            meeting_date: self.meeting_date.clone(),
            meeting_title: self.meeting_title.clone(),
            meta: self.meta.clone(),
            participants_raw: self.participants_input(),
            topics_raw: self.topics_input(),
            decisions_raw: self.decisions_input(),
            tasks: self
                .tasks
                .iter()
                .map(|task| TaskRow {
                    title: task.title.clone(),
                    assignee: task.assignee.clone(),
                    due: task.due.clone(),
                    completed: task.completed,
                })
                .collect(),
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            meeting_date: self.meeting_date.clone(),
            meeting_title: self.meeting_title.trim().to_string(),
            meta: self.meta.trim().to_string(),
            participants_raw: normalize_raw_text(&self.participants_input()),
            topics_raw: normalize_raw_text(&self.topics_input()),
            decisions_raw: normalize_raw_text(&self.decisions_input()),
            tasks: normalize_tasks(&self.tasks),
        }
    }
}

/// Trims task fields and drops tasks without a title.
pub fn normalize_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter_map(|task| {
            let title = task.title.trim();
            if title.is_empty() {
                return None;
            }
            Some(Task {
                title: title.to_string(),
                assignee: task.assignee.trim().to_string(),
                due: task.due.clone(),
                completed: task.completed,
            })
        })
        .collect()
}

/// Generates a new stable document id.
pub fn new_document_id() -> DocumentId {
    Uuid::new_v4().simple().to_string()
}

/// Current UTC time in RFC 3339 with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's date in the local timezone as `yyyy-mm-dd`.
pub fn today_iso_local() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_tasks, Document, FormInput, Task, TaskRow, MEETING_TITLE_MAX_CHARS};

    #[test]
    fn from_form_drops_untitled_rows_and_caps_title() {
        let doc = Document::from_form(FormInput {
            meeting_title: format!("  {}  ", "x".repeat(200)),
            tasks: vec![
                TaskRow {
                    title: "  ".to_string(),
                    ..TaskRow::default()
                },
                TaskRow {
                    title: " Ship ".to_string(),
                    assignee: " @Bob ".to_string(),
                    ..TaskRow::default()
                },
            ],
            ..FormInput::default()
        });

        assert!(!doc.id.is_empty());
        assert_eq!(doc.meeting_title.chars().count(), MEETING_TITLE_MAX_CHARS);
        assert_eq!(doc.tasks, vec![Task::new("Ship", "@Bob", "")]);
    }

    #[test]
    fn from_form_keeps_given_id() {
        let doc = Document::from_form(FormInput {
            id: Some("abc123".to_string()),
            ..FormInput::default()
        });
        assert_eq!(doc.id, "abc123");
    }

    #[test]
    fn normalize_tasks_trims_fields() {
        let tasks = vec![Task::new(" a ", " @x ", "2024-01-02"), Task::new("", "@y", "")];
        assert_eq!(normalize_tasks(&tasks), vec![Task::new("a", "@x", "2024-01-02")]);
    }
}
