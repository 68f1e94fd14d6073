use followup_core::model::document::{Document, Task};
use followup_core::tasks::dates::parse_loose_date_token;
use followup_core::tasks::extract::{extract_auto_task_from_line, ExtractContext};
use followup_core::{Locale, TaskResolver};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn extract(line: &str, known: &[String], locale: Locale) -> Option<Task> {
    let ctx = ExtractContext {
        locale,
        current_year: 2024,
        participant_names: known,
    };
    extract_auto_task_from_line(line, &ctx)
}

#[test]
fn loose_date_tokens_are_validated_as_calendar_dates() {
    assert_eq!(parse_loose_date_token("31.02.2024", Locale::Ru, 2024), None);
    assert_eq!(
        parse_loose_date_token("2024-02-29", Locale::Ru, 2024).as_deref(),
        Some("2024-02-29")
    );
    assert_eq!(
        parse_loose_date_token("1.3.24", Locale::Ru, 2024).as_deref(),
        Some("2024-03-01")
    );
    assert_eq!(
        parse_loose_date_token("3/1/2024", Locale::En, 2024).as_deref(),
        Some("2024-03-01")
    );
}

#[test]
fn right_most_known_participant_wins() {
    let known = names(&["Alice", "Bob"]);
    let task = extract("fix bug @Alice then @Bob due 2024-05-01", &known, Locale::En).unwrap();

    assert_eq!(task.assignee, "@Bob");
    assert_eq!(task.due, "2024-05-01");
    assert_eq!(task.title, "fix bug @Alice then due");
}

#[test]
fn name_prefix_does_not_match_inside_longer_tag() {
    let known = names(&["Al"]);
    let task = extract("ping @Alexander tomorrow", &known, Locale::En).unwrap();

    assert_eq!(task.assignee, "@Alexander");
    assert_eq!(task.title, "ping tomorrow");
}

#[test]
fn multi_word_names_keep_participant_spelling() {
    let known = names(&["Anna Maria", "Anna"]);
    let task = extract("2.3. Prepare deck @anna maria, 15.06", &known, Locale::Ru).unwrap();

    assert_eq!(task.assignee, "@Anna Maria");
    assert_eq!(task.due, "2024-06-15");
    assert_eq!(task.title, "Prepare deck");
}

#[test]
fn lines_without_tag_or_only_email_yield_nothing() {
    let known = names(&["Bob"]);
    assert_eq!(extract("Ship the build 2024-05-01", &known, Locale::En), None);
    assert_eq!(extract("write to bob@example.com", &known, Locale::En), None);
    assert_eq!(extract("stray @ sign", &known, Locale::En), None);
}

#[test]
fn resolver_merges_manual_and_auto_tasks_without_duplicates() {
    let doc = Document {
        participants_raw: Some("Alice, Bob".to_string()),
        topics_raw: Some("Release:\n- Ship @Bob 2024-05-01\n- Ship @Bob 2024-05-01".to_string()),
        decisions_raw: Some("Update docs @Alice\nCelebrate".to_string()),
        tasks: vec![
            Task::new("  Ship ", " @Bob ", "2024-05-01"),
            Task::new("   ", "@Bob", ""),
        ],
        ..Document::default()
    };

    let tasks = TaskResolver::new(Locale::En, 2024).resolve_document_tasks(&doc);

    assert_eq!(
        tasks,
        vec![
            Task::new("Ship", "@Bob", "2024-05-01"),
            Task::new("Update docs", "@Alice", ""),
        ]
    );
}

#[test]
fn auto_tasks_follow_participants_topics_decisions_order() {
    let doc = Document {
        participants_raw: Some("Carol @Carol".to_string()),
        topics_raw: Some("Infra\n- migrate db @Dan".to_string()),
        decisions_raw: Some("Freeze @Erin 1.06".to_string()),
        ..Document::default()
    };

    let tasks = TaskResolver::new(Locale::Ru, 2025).collect_auto_tasks(&doc);

    let assignees: Vec<&str> = tasks.iter().map(|task| task.assignee.as_str()).collect();
    assert_eq!(assignees, vec!["@Carol", "@Dan", "@Erin"]);
    assert_eq!(tasks[2].due, "2025-06-01");
}
