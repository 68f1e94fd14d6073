use followup_core::model::document::{Document, FormInput, Task, TaskRow, MEETING_TITLE_MAX_CHARS};
use serde_json::json;

#[test]
fn documents_serialize_with_camel_case_fields() {
    let doc = Document::from_form(FormInput {
        id: Some("abc".to_string()),
        meeting_date: "2024-05-01".to_string(),
        meeting_title: "Sync".to_string(),
        participants_raw: "Alice".to_string(),
        tasks: vec![TaskRow {
            title: "Ship".to_string(),
            assignee: "@Bob".to_string(),
            ..TaskRow::default()
        }],
        ..FormInput::default()
    });

    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["id"], "abc");
    assert_eq!(value["meetingDate"], "2024-05-01");
    assert_eq!(value["participantsRaw"], "Alice");
    assert_eq!(value["participants"], json!([{ "text": "Alice" }]));
    assert_eq!(
        value["tasks"],
        json!([{ "title": "Ship", "assignee": "@Bob", "due": "", "completed": false }])
    );
    assert!(value["updatedAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn older_records_load_and_rebuild_raw_inputs() {
    let stored = json!({
        "id": "old",
        "meetingDate": "2023-11-02",
        "meetingTitle": "Retro",
        "participants": [{ "text": "Alice" }, { "text": "Bob" }],
        "topics": [{ "text": "CI:\nflaky tests\ncache" }],
        "decisions": [{ "text": "Pin versions" }],
        "tasks": [{ "title": "Fix CI", "owner": "@Bob" }]
    });

    let doc: Document = serde_json::from_value(stored).unwrap();

    assert_eq!(doc.tasks, vec![Task::new("Fix CI", "@Bob", "")]);
    assert!(doc.participants_raw.is_none());
    assert_eq!(doc.participants_input(), "Alice\nBob");
    assert_eq!(doc.topics_input(), "CI:\n- flaky tests;\n- cache.");
    assert_eq!(doc.decisions_input(), "Pin versions");

    let rebuilt = Document::from_form(doc.to_form());
    assert_eq!(rebuilt.participants, doc.participants);
    assert_eq!(rebuilt.topics, doc.topics);
    assert_eq!(rebuilt.decisions, doc.decisions);
}

#[test]
fn form_title_is_trimmed_and_capped() {
    let doc = Document::from_form(FormInput {
        meeting_title: format!("  {}  ", "я".repeat(MEETING_TITLE_MAX_CHARS + 20)),
        ..FormInput::default()
    });

    assert_eq!(doc.meeting_title.chars().count(), MEETING_TITLE_MAX_CHARS);
    assert_eq!(doc.id.len(), 32);
}

#[test]
fn form_due_dates_keep_only_valid_iso_values() {
    let row = |title: &str, due: &str| TaskRow {
        title: title.to_string(),
        due: due.to_string(),
        ..TaskRow::default()
    };
    let doc = Document::from_form(FormInput {
        tasks: vec![
            row("Ship", " 2024-05-02 "),
            row("Plan", "2024-02-30"),
            row("Call", "next week"),
            row("Idle", ""),
        ],
        ..FormInput::default()
    });

    let dues: Vec<&str> = doc.tasks.iter().map(|task| task.due.as_str()).collect();
    assert_eq!(dues, vec!["2024-05-02", "", "", ""]);
}
