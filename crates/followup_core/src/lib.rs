//! Core domain logic for followup meeting protocols.
//!
//! Free-text participants/topics/decisions are normalized into structured
//! items, action items are auto-extracted from prose, and the document is
//! rendered into a numbered protocol. Storage and the use-case service live
//! alongside the pure core and never feed back into it.

pub mod db;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod render;
pub mod report;
pub mod repo;
pub mod service;
pub mod tasks;
pub mod text;

pub use db::{open_db, open_db_in_memory, Connection, DbError, DbResult};
pub use i18n::{resolve_locale, Catalog, Locale, Translator};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    Document, DocumentId, FormInput, NormalizedTopic, Task, TaskRow, TextItem, Topic,
};
pub use render::export::export_file_name;
pub use render::preview::{build_clipboard_html, render_preview_text};
pub use render::protocol::ProtocolRenderer;
pub use report::TaskReport;
pub use repo::doc_repo::{
    DocRepository, RepoError, RepoResult, SqliteDocRepository, TrashedDocument,
};
pub use service::document_service::{DocumentService, DocumentServiceError, ServiceResult};
pub use tasks::resolver::TaskResolver;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
