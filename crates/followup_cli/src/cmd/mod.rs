//! Shared CLI context: locale, document store location, form loading.

use anyhow::Context as _;
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use followup_core::{
    init_logging, open_db, resolve_locale, Catalog, Connection, Document, DocumentService,
    FormInput, Locale, SqliteDocRepository, TaskResolver,
};
use log::debug;
use std::path::{Path, PathBuf};

pub mod export;
pub mod render;
pub mod report;
pub mod store;
pub mod tasks;

const DEFAULT_DB_FILE: &str = "followup.db";

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Interface language (en, ru); falls back to LANG
    #[arg(long, global = true, env = "FOLLOWUP_LOCALE")]
    pub locale: Option<String>,

    /// Document store file
    #[arg(long, global = true, env = "FOLLOWUP_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, global = true, env = "FOLLOWUP_LOG_DIR")]
    pub log_dir: Option<String>,
}

pub struct Context {
    pub locale: Locale,
    pub catalog: Catalog,
    pub db_path: PathBuf,
    pub today: NaiveDate,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        if let Some(log_dir) = &args.log_dir {
            let level = args
                .log_level
                .as_deref()
                .unwrap_or_else(|| followup_core::default_log_level());
            init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
        }

        let lang = std::env::var("LANG").ok();
        let locale = resolve_locale(args.locale.as_deref().into_iter().chain(lang.as_deref()));
        debug!("event=cli_start module=cli status=ok locale={}", locale.as_str());

        Ok(Self {
            locale,
            catalog: Catalog::new(locale),
            db_path: args.db.clone(),
            today: Local::now().date_naive(),
        })
    }

    /// Opens (creating if needed) the document store.
    pub fn open_store(&self) -> anyhow::Result<Connection> {
        open_db(&self.db_path)
            .with_context(|| format!("failed to open document store `{}`", self.db_path.display()))
    }

    /// Participants raw text of saved documents; empty when no store exists yet.
    pub fn history_participants(&self) -> anyhow::Result<Vec<String>> {
        if !self.db_path.exists() {
            return Ok(Vec::new());
        }
        let conn = self.open_store()?;
        let service = DocumentService::new(SqliteDocRepository::new(&conn));
        Ok(service.history_participants()?)
    }

    pub fn resolver(&self, history: Vec<String>) -> TaskResolver {
        TaskResolver::new(self.locale, self.today.year()).with_history(history)
    }
}

/// Reads a meeting form (or a stored document) from a JSON file, `-` for stdin.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let text = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("failed to read form from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read form `{}`", path.display()))?
    };
    parse_document(&text).with_context(|| format!("invalid form JSON in `{}`", path.display()))
}

/// Accepts either a saved document (has structured arrays) or form input.
fn parse_document(text: &str) -> anyhow::Result<Document> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let is_document = ["participants", "topics", "decisions"]
        .iter()
        .any(|key| value.get(key).is_some());
    if is_document {
        return Ok(serde_json::from_value(value)?);
    }
    let form: FormInput = serde_json::from_value(value)?;
    Ok(Document::from_form(form))
}

#[cfg(test)]
mod tests {
    use super::parse_document;

    #[test]
    fn form_input_is_normalized() {
        let doc = parse_document(
            r#"{"meetingDate":"2024-05-01","meetingTitle":" Sync ","participantsRaw":"Alice, Bob"}"#,
        )
        .unwrap();
        assert_eq!(doc.meeting_title, "Sync");
        assert_eq!(doc.participants.len(), 2);
        assert!(!doc.id.is_empty());
    }

    #[test]
    fn stored_document_is_taken_verbatim() {
        let doc = parse_document(
            r#"{"id":"x","participants":[{"text":"Alice"}],"tasks":[{"title":"Ship","owner":"@Bob"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "x");
        assert_eq!(doc.tasks[0].assignee, "@Bob");
        assert!(doc.participants_raw.is_none());
    }
}
