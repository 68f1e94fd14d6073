//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist saved documents, the trash and the single working draft.
//! - Keep list ordering and soft-delete tombstones inside SQL.
//!
//! # Invariants
//! - A document id lives in exactly one place: the active list or the trash.
//! - Inserting, restoring and trashing move a document to the top of its list.
//! - Updating an active document keeps its list position.
//! - Payloads that fail to decode surface as `InvalidData`, never as absence.

use crate::db::DbError;
use crate::model::document::{now_timestamp, Document, DocumentId};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DRAFT_SLOT: i64 = 1;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(DocumentId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A document in the trash with its deletion timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashedDocument {
    pub document: Document,
    /// RFC 3339 UTC.
    pub deleted_at: String,
}

/// Storage contract used by the document service.
pub trait DocRepository {
    /// Active documents, most recently inserted or restored first.
    fn list_documents(&self) -> RepoResult<Vec<Document>>;
    /// Trashed documents, most recently deleted first.
    fn list_trash(&self) -> RepoResult<Vec<TrashedDocument>>;
    /// Active document by id.
    fn get_document(&self, id: &str) -> RepoResult<Option<Document>>;
    /// Replaces an active document in place, or inserts it at the top.
    ///
    /// A trashed document with the same id is brought back.
    fn upsert_document(&self, doc: &Document) -> RepoResult<()>;
    fn trash_document(&self, id: &str) -> RepoResult<()>;
    fn restore_document(&self, id: &str) -> RepoResult<()>;
    /// Permanently removes a trashed document.
    fn purge_document(&self, id: &str) -> RepoResult<()>;
    fn get_draft(&self) -> RepoResult<Option<Document>>;
    fn set_draft(&self, doc: &Document) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn next_list_order(&self) -> RepoResult<i64> {
        let order = self.conn.query_row(
            "SELECT COALESCE(MAX(list_order), 0) + 1 FROM documents;",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(order)
    }
}

impl DocRepository for SqliteDocRepository<'_> {
    fn list_documents(&self) -> RepoResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM documents
             WHERE deleted_at IS NULL
             ORDER BY list_order DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut docs = Vec::new();
        while let Some(row) = rows.next()? {
            docs.push(parse_payload_row(row)?);
        }
        Ok(docs)
    }

    fn list_trash(&self) -> RepoResult<Vec<TrashedDocument>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload, deleted_at FROM documents
             WHERE deleted_at IS NOT NULL
             ORDER BY list_order DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut docs = Vec::new();
        while let Some(row) = rows.next()? {
            docs.push(TrashedDocument {
                document: parse_payload_row(row)?,
                deleted_at: row.get(1)?,
            });
        }
        Ok(docs)
    }

    fn get_document(&self, id: &str) -> RepoResult<Option<Document>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM documents WHERE id = ?1 AND deleted_at IS NULL;",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        payload.map(|payload| decode_document(&payload)).transpose()
    }

    fn upsert_document(&self, doc: &Document) -> RepoResult<()> {
        let payload = encode_document(doc)?;
        let updated = self.conn.execute(
            "UPDATE documents
             SET payload = ?1, updated_at = ?2
             WHERE id = ?3 AND deleted_at IS NULL;",
            params![payload, doc.updated_at, doc.id],
        )?;
        if updated > 0 {
            info!("event=doc_upsert module=repo status=ok mode=update doc_id={}", doc.id);
            return Ok(());
        }

        let order = self.next_list_order()?;
        self.conn.execute(
            "INSERT INTO documents (id, payload, updated_at, list_order, deleted_at)
             VALUES (?1, ?2, ?3, ?4, NULL)
             ON CONFLICT(id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at,
                list_order = excluded.list_order,
                deleted_at = NULL;",
            params![doc.id, payload, doc.updated_at, order],
        )?;
        info!("event=doc_upsert module=repo status=ok mode=insert doc_id={}", doc.id);
        Ok(())
    }

    fn trash_document(&self, id: &str) -> RepoResult<()> {
        let order = self.next_list_order()?;
        let changed = self.conn.execute(
            "UPDATE documents
             SET deleted_at = ?1, list_order = ?2
             WHERE id = ?3 AND deleted_at IS NULL;",
            params![now_timestamp(), order, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn restore_document(&self, id: &str) -> RepoResult<()> {
        let order = self.next_list_order()?;
        let changed = self.conn.execute(
            "UPDATE documents
             SET deleted_at = NULL, list_order = ?1
             WHERE id = ?2 AND deleted_at IS NOT NULL;",
            params![order, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn purge_document(&self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE id = ?1 AND deleted_at IS NOT NULL;",
            params![id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn get_draft(&self) -> RepoResult<Option<Document>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM drafts WHERE slot = ?1;",
                params![DRAFT_SLOT],
                |row| row.get(0),
            )
            .optional()?;
        payload.map(|payload| decode_document(&payload)).transpose()
    }

    fn set_draft(&self, doc: &Document) -> RepoResult<()> {
        let payload = encode_document(doc)?;
        self.conn.execute(
            "INSERT INTO drafts (slot, payload, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                saved_at = excluded.saved_at;",
            params![DRAFT_SLOT, payload, now_timestamp()],
        )?;
        Ok(())
    }
}

fn parse_payload_row(row: &Row<'_>) -> RepoResult<Document> {
    let payload: String = row.get(0)?;
    decode_document(&payload)
}

fn encode_document(doc: &Document) -> RepoResult<String> {
    serde_json::to_string(doc).map_err(|err| RepoError::InvalidData(err.to_string()))
}

fn decode_document(payload: &str) -> RepoResult<Document> {
    serde_json::from_str(payload).map_err(|err| RepoError::InvalidData(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{DocRepository, RepoError, SqliteDocRepository};
    use crate::db::open_db_in_memory;
    use crate::model::document::Document;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            meeting_date: "2024-05-01".to_string(),
            meeting_title: title.to_string(),
            updated_at: "2024-05-01T10:00:00.000Z".to_string(),
            ..Document::default()
        }
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|doc| doc.id.as_str()).collect()
    }

    #[test]
    fn insert_goes_to_top_and_update_keeps_position() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocRepository::new(&conn);

        repo.upsert_document(&doc("a", "First")).unwrap();
        repo.upsert_document(&doc("b", "Second")).unwrap();
        repo.upsert_document(&doc("a", "First edited")).unwrap();

        let docs = repo.list_documents().unwrap();
        assert_eq!(ids(&docs), vec!["b", "a"]);
        assert_eq!(docs[1].meeting_title, "First edited");
    }

    #[test]
    fn trash_restore_and_purge_move_between_lists() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocRepository::new(&conn);
        repo.upsert_document(&doc("a", "A")).unwrap();
        repo.upsert_document(&doc("b", "B")).unwrap();

        repo.trash_document("b").unwrap();
        repo.trash_document("a").unwrap();
        assert!(repo.list_documents().unwrap().is_empty());
        let trash = repo.list_trash().unwrap();
        let trashed: Vec<&str> = trash.iter().map(|t| t.document.id.as_str()).collect();
        assert_eq!(trashed, vec!["a", "b"]);
        assert!(repo.get_document("a").unwrap().is_none());

        repo.restore_document("b").unwrap();
        assert_eq!(ids(&repo.list_documents().unwrap()), vec!["b"]);

        repo.purge_document("a").unwrap();
        assert!(repo.list_trash().unwrap().is_empty());
        assert!(matches!(
            repo.purge_document("b"),
            Err(RepoError::NotFound(id)) if id == "b"
        ));
    }

    #[test]
    fn draft_slot_is_overwritten() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocRepository::new(&conn);
        assert!(repo.get_draft().unwrap().is_none());

        repo.set_draft(&doc("d1", "One")).unwrap();
        repo.set_draft(&doc("d2", "Two")).unwrap();

        assert_eq!(repo.get_draft().unwrap().unwrap().id, "d2");
    }

    #[test]
    fn corrupt_payload_is_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO documents (id, payload, updated_at, list_order) VALUES ('x', 'nope', '', 1);",
            [],
        )
        .unwrap();
        let repo = SqliteDocRepository::new(&conn);

        assert!(matches!(repo.get_document("x"), Err(RepoError::InvalidData(_))));
    }
}
