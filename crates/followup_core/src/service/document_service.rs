//! Document use-case service.
//!
//! # Responsibility
//! - Save, copy, trash, restore and purge documents.
//! - Detect unsaved changes against the stored copy or a blank form.
//! - Feed known participant names and report inputs to callers.
//!
//! # Invariants
//! - A document is only stored with both a meeting date and a title.
//! - `save` never changes an existing document's list position.
//! - The service stays storage-agnostic; all SQL lives behind `DocRepository`.

use crate::model::document::{
    new_document_id, now_timestamp, today_iso_local, Document, DocumentId, FormInput, TaskRow,
};
use crate::repo::doc_repo::{DocRepository, RepoError, TrashedDocument};
use crate::tasks::names;
use crate::text::has_user_content;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Meta line offered when no saved document carries one.
pub const DEFAULT_META: &str = "#followup";

pub type ServiceResult<T> = Result<T, DocumentServiceError>;

#[derive(Debug)]
pub enum DocumentServiceError {
    /// Saving requires both `meeting_date` and `meeting_title`.
    MissingDateOrTitle,
    NotFound(DocumentId),
    Repo(RepoError),
}

impl Display for DocumentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDateOrTitle => write!(f, "meeting date and title are required"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::MissingDateOrTitle | Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for DocumentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service over a document repository.
pub struct DocumentService<R: DocRepository> {
    repo: R,
}

impl<R: DocRepository> DocumentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_documents(&self) -> ServiceResult<Vec<Document>> {
        Ok(self.repo.list_documents()?)
    }

    pub fn list_trash(&self) -> ServiceResult<Vec<TrashedDocument>> {
        Ok(self.repo.list_trash()?)
    }

    pub fn get_document(&self, id: &str) -> ServiceResult<Option<Document>> {
        Ok(self.repo.get_document(id)?)
    }

    pub fn is_stored(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.repo.get_document(id)?.is_some())
    }

    /// Stores `doc`, replacing the saved copy with the same id if present.
    ///
    /// A replaced copy gets a fresh `updated_at`; a new document keeps the
    /// timestamp it was built with.
    pub fn save(&self, doc: &Document) -> ServiceResult<Document> {
        ensure_saveable(doc)?;
        let mut saved = doc.clone();
        let mode = if self.repo.get_document(&doc.id)?.is_some() {
            saved.updated_at = now_timestamp();
            "replace"
        } else {
            "insert"
        };
        self.repo.upsert_document(&saved)?;
        info!(
            "event=doc_save module=service status=ok mode={mode} doc_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Stores a copy of `doc` under a fresh id at the top of the list.
    pub fn save_as_new(&self, doc: &Document) -> ServiceResult<Document> {
        ensure_saveable(doc)?;
        let copy = Document {
            id: new_document_id(),
            updated_at: now_timestamp(),
            ..doc.clone()
        };
        self.repo.upsert_document(&copy)?;
        info!(
            "event=doc_save module=service status=ok mode=copy doc_id={} source_id={}",
            copy.id, doc.id
        );
        Ok(copy)
    }

    pub fn trash(&self, id: &str) -> ServiceResult<()> {
        self.repo.trash_document(id)?;
        info!("event=doc_trash module=service status=ok doc_id={id}");
        Ok(())
    }

    pub fn restore(&self, id: &str) -> ServiceResult<()> {
        self.repo.restore_document(id)?;
        info!("event=doc_restore module=service status=ok doc_id={id}");
        Ok(())
    }

    pub fn purge(&self, id: &str) -> ServiceResult<()> {
        self.repo.purge_document(id)?;
        info!("event=doc_purge module=service status=ok doc_id={id}");
        Ok(())
    }

    pub fn get_draft(&self) -> ServiceResult<Option<Document>> {
        Ok(self.repo.get_draft()?)
    }

    pub fn set_draft(&self, doc: &Document) -> ServiceResult<()> {
        Ok(self.repo.set_draft(doc)?)
    }

    /// Whether `doc` differs from its stored copy; `false` when not stored.
    pub fn has_unsaved_changes(&self, doc: &Document) -> ServiceResult<bool> {
        match self.repo.get_document(&doc.id)? {
            Some(stored) => Ok(stored.snapshot() != doc.snapshot()),
            None => Ok(false),
        }
    }

    /// Whether an unsaved draft carries anything beyond a blank form.
    pub fn has_local_edits(&self, doc: &Document) -> ServiceResult<bool> {
        if !doc.meeting_title.trim().is_empty()
            || doc.meta.trim() != self.last_meta()?
            || has_user_content(&doc.participants_input())
            || has_user_content(&doc.topics_input())
            || has_user_content(&doc.decisions_input())
        {
            return Ok(true);
        }
        Ok(doc.tasks.iter().any(|task| !task.title.trim().is_empty()))
    }

    /// Stored changes for a saved document, local edits for a draft.
    pub fn should_confirm_reset(&self, doc: &Document) -> ServiceResult<bool> {
        if self.is_stored(&doc.id)? {
            return self.has_unsaved_changes(doc);
        }
        self.has_local_edits(doc)
    }

    /// Meta of the newest saved document that has one.
    pub fn last_meta(&self) -> ServiceResult<String> {
        let docs = self.repo.list_documents()?;
        Ok(docs
            .into_iter()
            .find(|doc| !doc.meta.trim().is_empty())
            .map(|doc| doc.meta)
            .unwrap_or_else(|| DEFAULT_META.to_string()))
    }

    /// Form state for a fresh meeting: today's date, last meta, one empty task row.
    pub fn blank_form(&self) -> ServiceResult<FormInput> {
        Ok(FormInput {
            id: None,
            meeting_date: today_iso_local(),
            meta: self.last_meta()?,
            tasks: vec![TaskRow::default()],
            ..FormInput::default()
        })
    }

    /// Participants raw text of every saved document, newest first.
    pub fn history_participants(&self) -> ServiceResult<Vec<String>> {
        Ok(self
            .repo
            .list_documents()?
            .iter()
            .map(Document::participants_input)
            .collect())
    }

    /// Names recognised as `@name` tags for a document being edited.
    pub fn known_participant_names(&self, current_raw: &str) -> ServiceResult<Vec<String>> {
        let history = self.history_participants()?;
        Ok(names::participant_reference_names(
            current_raw,
            history.iter().map(String::as_str),
        ))
    }

    /// Mention completion candidates, most frequent first.
    pub fn participant_candidates(&self, current_raw: &str) -> ServiceResult<Vec<String>> {
        let history = self.history_participants()?;
        Ok(names::participant_candidates(
            current_raw,
            history.iter().map(String::as_str),
        ))
    }

    /// Report inputs: the draft first, then saved documents other than it.
    pub fn report_documents(&self, draft: &Document) -> ServiceResult<Vec<Document>> {
        let mut docs = vec![draft.clone()];
        docs.extend(
            self.repo
                .list_documents()?
                .into_iter()
                .filter(|doc| doc.id != draft.id),
        );
        Ok(docs)
    }
}

fn ensure_saveable(doc: &Document) -> ServiceResult<()> {
    if doc.meeting_date.trim().is_empty() || doc.meeting_title.trim().is_empty() {
        warn!(
            "event=doc_save module=service status=rejected reason=missing_date_or_title doc_id={}",
            doc.id
        );
        return Err(DocumentServiceError::MissingDateOrTitle);
    }
    Ok(())
}
