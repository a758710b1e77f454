//! SQLite-backed document collection.
//!
//! # Responsibility
//! - Persist documents as JSON bodies in the shared `documents` table.
//! - Scope every statement to one collection name.
//!
//! # Invariants
//! - `(collection, id)` is unique; `save` upserts on that key.
//! - Reads reject bodies that fail to decode or whose id disagrees with the
//!   row key instead of skipping them.
//! - Listing order is insertion order (`seq`), unchanged by upserts.

use crate::store::{Collection, Document, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::marker::PhantomData;
use uuid::Uuid;

/// Collection view over a migrated connection.
pub struct SqliteCollection<'conn, D> {
    conn: &'conn Connection,
    _document: PhantomData<fn() -> D>,
}

impl<'conn, D: Document> SqliteCollection<'conn, D> {
    /// Constructs a collection over a connection returned by `open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _document: PhantomData,
        }
    }
}

impl<D: Document> Collection<D> for SqliteCollection<'_, D> {
    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        let id_text = id.to_string();
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2;",
                params![D::COLLECTION, id_text],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| decode_document::<D>(&id_text, &body))
            .transpose()
    }

    fn find_all(&self) -> StoreResult<Vec<D>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, body
             FROM documents
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query(params![D::COLLECTION])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let body: String = row.get("body")?;
            documents.push(decode_document::<D>(&id_text, &body)?);
        }

        Ok(documents)
    }

    fn save(&self, document: &D) -> StoreResult<D> {
        let body = serde_json::to_string(document)?;
        self.conn.execute(
            "INSERT INTO documents (collection, id, body)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![D::COLLECTION, document.id().to_string(), body],
        )?;
        Ok(document.clone())
    }

    fn exists_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM documents WHERE collection = ?1 AND id = ?2
             );",
            params![D::COLLECTION, id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists != 0)
    }

    fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![D::COLLECTION, id.to_string()],
        )?;
        Ok(())
    }
}

fn decode_document<D: Document>(id_text: &str, body: &str) -> StoreResult<D> {
    let document: D = serde_json::from_str(body).map_err(|err| {
        StoreError::InvalidData(format!(
            "cannot decode `{}` document `{id_text}`: {err}",
            D::COLLECTION
        ))
    })?;

    if document.id().to_string() != id_text {
        return Err(StoreError::InvalidData(format!(
            "`{}` document `{id_text}` carries mismatched id `{}`",
            D::COLLECTION,
            document.id()
        )));
    }

    Ok(document)
}
