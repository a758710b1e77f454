//! Collection abstraction over the document store.
//!
//! # Responsibility
//! - Define the per-entity access contract used by the services.
//! - Keep storage details (SQL, JSON encoding, locking) out of services.
//!
//! # Invariants
//! - `save` is an upsert keyed by `Document::id`; it is the only write
//!   primitive besides `delete_by_id`.
//! - Iteration order is store order (insertion order for both backends).
//! - Single-document writes are atomic; nothing spans documents.

use crate::db::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCollection;
pub use sqlite::SqliteCollection;

pub type StoreResult<T> = Result<T, StoreError>;

/// Predicate evaluated against decoded documents.
pub type Predicate<'a, D> = &'a dyn Fn(&D) -> bool;

/// Entity that can be stored in a named collection.
pub trait Document: Serialize + DeserializeOwned + Clone {
    /// Collection name; also used as the SQLite `collection` column value.
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

/// Storage-layer failure. Never used to signal a missing document.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
    /// A writer panicked while holding the collection lock.
    Poisoned(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "document serialization failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
            Self::Poisoned(collection) => write!(f, "collection `{collection}` lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) | Self::Poisoned(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Access contract for one entity collection.
pub trait Collection<D: Document> {
    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>>;

    fn find_all(&self) -> StoreResult<Vec<D>>;

    /// Returns the first document, in store order, matching `predicate`.
    fn find_one(&self, predicate: Predicate<'_, D>) -> StoreResult<Option<D>> {
        Ok(self.find_all()?.into_iter().find(|doc| predicate(doc)))
    }

    fn find_many(&self, predicate: Predicate<'_, D>) -> StoreResult<Vec<D>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|doc| predicate(doc))
            .collect())
    }

    /// Inserts or replaces the document with the same id.
    fn save(&self, document: &D) -> StoreResult<D>;

    fn exists_by_id(&self, id: Uuid) -> StoreResult<bool>;

    /// Removes the document if present. Absent ids are not an error.
    fn delete_by_id(&self, id: Uuid) -> StoreResult<()>;
}

impl<D: Document, C: Collection<D> + ?Sized> Collection<D> for &C {
    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> StoreResult<Vec<D>> {
        (**self).find_all()
    }

    fn find_one(&self, predicate: Predicate<'_, D>) -> StoreResult<Option<D>> {
        (**self).find_one(predicate)
    }

    fn find_many(&self, predicate: Predicate<'_, D>) -> StoreResult<Vec<D>> {
        (**self).find_many(predicate)
    }

    fn save(&self, document: &D) -> StoreResult<D> {
        (**self).save(document)
    }

    fn exists_by_id(&self, id: Uuid) -> StoreResult<bool> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        (**self).delete_by_id(id)
    }
}
