//! Merges explicit task rows with auto-detected tasks.
//!
//! # Invariants
//! - Explicit tasks come first, in their original order.
//! - Auto tasks follow in line-scan order: participants, topics, decisions.
//! - No two resolved tasks share the same `title\0assignee\0due` key unless
//!   both were entered explicitly.

use super::extract::{extract_auto_tasks, ExtractContext};
use super::names::participant_reference_names;
use crate::i18n::Locale;
use crate::model::document::{normalize_tasks, Document, Task};
use crate::text::normalize_raw_text;
use log::debug;
use std::collections::HashSet;

/// Resolves the full task list of a document.
///
/// Holds the participants raw text of previously saved documents so that
/// names accumulate across history without the resolver touching storage.
#[derive(Debug, Clone)]
pub struct TaskResolver {
    locale: Locale,
    current_year: i32,
    history_participants: Vec<String>,
}

impl TaskResolver {
    pub fn new(locale: Locale, current_year: i32) -> Self {
        Self {
            locale,
            current_year,
            history_participants: Vec::new(),
        }
    }

    /// Adds participants raw text of saved documents to the known-name pool.
    pub fn with_history<I, S>(mut self, participants_raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.history_participants = participants_raw.into_iter().map(Into::into).collect();
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Known names for one document: its own participants, then history.
    pub fn participant_names(&self, participants_raw: &str) -> Vec<String> {
        participant_reference_names(
            participants_raw,
            self.history_participants.iter().map(String::as_str),
        )
    }

    /// Auto-detected tasks over the participants, topics and decisions text.
    pub fn collect_auto_tasks(&self, doc: &Document) -> Vec<Task> {
        let participants_raw = normalize_raw_text(&doc.participants_input());
        let topics_raw = normalize_raw_text(&doc.topics_input());
        let decisions_raw = normalize_raw_text(&doc.decisions_input());
        let names = self.participant_names(&participants_raw);

        let ctx = ExtractContext {
            locale: self.locale,
            current_year: self.current_year,
            participant_names: &names,
        };
        extract_auto_tasks(
            [
                participants_raw.as_str(),
                topics_raw.as_str(),
                decisions_raw.as_str(),
            ],
            &ctx,
        )
    }

    /// Explicit tasks followed by de-duplicated auto tasks.
    pub fn resolve_document_tasks(&self, doc: &Document) -> Vec<Task> {
        let mut merged = normalize_tasks(&doc.tasks);
        let mut seen: HashSet<String> = merged.iter().map(Task::dedup_key).collect();
        let manual_count = merged.len();

        for task in self.collect_auto_tasks(doc) {
            if seen.insert(task.dedup_key()) {
                merged.push(task);
            }
        }

        debug!(
            "event=tasks_resolve module=tasks status=ok manual={} auto={}",
            manual_count,
            merged.len() - manual_count
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::TaskResolver;
    use crate::i18n::Locale;
    use crate::model::document::{Document, Task};

    fn doc(participants: &str, topics: &str, decisions: &str, tasks: Vec<Task>) -> Document {
        Document {
            participants_raw: Some(participants.to_string()),
            topics_raw: Some(topics.to_string()),
            decisions_raw: Some(decisions.to_string()),
            tasks,
            ..Document::default()
        }
    }

    #[test]
    fn manual_tasks_first_then_auto_in_scan_order() {
        let resolver = TaskResolver::new(Locale::En, 2024);
        let doc = doc(
            "Ann, Bob",
            "Infra:\n- migrate db @Bob 2024-06-01",
            "Publish notes @Ann",
            vec![Task::new("Book room", "", "")],
        );
        let tasks = resolver.resolve_document_tasks(&doc);
        assert_eq!(
            tasks,
            vec![
                Task::new("Book room", "", ""),
                Task::new("migrate db", "@Bob", "2024-06-01"),
                Task::new("Publish notes", "@Ann", ""),
            ]
        );
    }

    #[test]
    fn duplicates_of_manual_and_auto_tasks_collapse() {
        let resolver = TaskResolver::new(Locale::En, 2024);
        let doc = doc(
            "Bob",
            "",
            "Ship @Bob 2024-05-01\nShip @Bob 2024-05-01",
            vec![Task::new("Ship", "@Bob", "2024-05-01")],
        );
        let tasks = resolver.resolve_document_tasks(&doc);
        assert_eq!(tasks, vec![Task::new("Ship", "@Bob", "2024-05-01")]);
    }

    #[test]
    fn history_names_feed_assignee_matching() {
        let resolver = TaskResolver::new(Locale::En, 2024).with_history(["Anna Maria"]);
        let doc = doc("", "", "Draft memo @Anna Maria", Vec::new());
        let tasks = resolver.collect_auto_tasks(&doc);
        assert_eq!(tasks, vec![Task::new("Draft memo", "@Anna Maria", "")]);
    }
}
