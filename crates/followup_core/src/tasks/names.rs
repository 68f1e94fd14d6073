//! Known participant names across the current document and saved history.
//!
//! Names are keyed case-insensitively; the first spelling seen is kept.

use crate::text::participants::collect_participants_from_input;
use std::collections::HashMap;

/// One distinct participant name and how often it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantName {
    pub name: String,
    pub count: usize,
}

/// Counts participant names, current document first, in first-seen order.
pub fn collect_participant_name_frequency<'a>(
    current_participants_raw: &'a str,
    history_participants_raw: impl IntoIterator<Item = &'a str>,
) -> Vec<ParticipantName> {
    let mut entries: Vec<ParticipantName> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    let sources = std::iter::once(current_participants_raw).chain(history_participants_raw);
    for raw in sources {
        for item in collect_participants_from_input(raw) {
            let cleaned = item.text.trim().trim_start_matches('@');
            if cleaned.is_empty() {
                continue;
            }
            let key = cleaned.to_lowercase();
            match index_by_key.get(&key) {
                Some(&index) => entries[index].count += 1,
                None => {
                    index_by_key.insert(key, entries.len());
                    entries.push(ParticipantName {
                        name: cleaned.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }
    entries
}

/// Names used to recognise `@name` tags, in first-seen order.
pub fn participant_reference_names<'a>(
    current_participants_raw: &'a str,
    history_participants_raw: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    collect_participant_name_frequency(current_participants_raw, history_participants_raw)
        .into_iter()
        .map(|entry| entry.name)
        .collect()
}

/// Names offered for `@` mention completion: most frequent first, then by name.
pub fn participant_candidates<'a>(
    current_participants_raw: &'a str,
    history_participants_raw: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut entries =
        collect_participant_name_frequency(current_participants_raw, history_participants_raw);
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.into_iter().map(|entry| entry.name).collect()
}

#[cfg(test)]
mod tests {
    use super::{collect_participant_name_frequency, participant_candidates, participant_reference_names};

    #[test]
    fn keys_names_case_insensitively_keeping_first_spelling() {
        let entries = collect_participant_name_frequency("Alice, @bob", ["BOB\nCarol", "alice"]);
        let summary: Vec<_> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.count))
            .collect();
        assert_eq!(summary, vec![("Alice", 2), ("bob", 2), ("Carol", 1)]);
    }

    #[test]
    fn reference_names_keep_current_document_first() {
        let names = participant_reference_names("Zed", ["Amy", "Zed"]);
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[test]
    fn candidates_rank_by_frequency_then_name() {
        let names = participant_candidates("Zed", ["bea, Amy", "Amy", "Zed"]);
        assert_eq!(names, vec!["Amy", "Zed", "bea"]);
    }

    #[test]
    fn accepts_owned_current_and_history_text() {
        let current = String::from("Dana");
        let history = vec![String::from("Eli, dana"), String::from("Eli")];

        let names = participant_candidates(&current, history.iter().map(String::as_str));
        assert_eq!(names, vec!["Dana", "Eli"]);

        let names = participant_reference_names(current.as_str(), history.iter().map(String::as_str));
        assert_eq!(names, vec!["Dana", "Eli"]);
    }
}
