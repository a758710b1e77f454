//! In-process collection backend.
//!
//! Clones share the same underlying documents, so one handle can be given
//! to each service while tests inspect another.

use crate::store::{Collection, Document, Predicate, StoreError, StoreResult};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Insertion-ordered collection held in memory.
#[derive(Debug)]
pub struct MemoryCollection<D> {
    documents: Arc<RwLock<Vec<D>>>,
}

impl<D> Clone for MemoryCollection<D> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<D> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<D: Document> MemoryCollection<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<D>>> {
        self.documents
            .read()
            .map_err(|_| StoreError::Poisoned(D::COLLECTION))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<D>>> {
        self.documents
            .write()
            .map_err(|_| StoreError::Poisoned(D::COLLECTION))
    }
}

impl<D: Document> Collection<D> for MemoryCollection<D> {
    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<D>> {
        Ok(self.read()?.iter().find(|doc| doc.id() == id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<D>> {
        Ok(self.read()?.clone())
    }

    fn find_one(&self, predicate: Predicate<'_, D>) -> StoreResult<Option<D>> {
        Ok(self.read()?.iter().find(|doc| predicate(*doc)).cloned())
    }

    fn find_many(&self, predicate: Predicate<'_, D>) -> StoreResult<Vec<D>> {
        Ok(self
            .read()?
            .iter()
            .filter(|doc| predicate(*doc))
            .cloned()
            .collect())
    }

    fn save(&self, document: &D) -> StoreResult<D> {
        let mut documents = self.write()?;
        let id = document.id();
        match documents.iter_mut().find(|doc| doc.id() == id) {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(document.clone())
    }

    fn exists_by_id(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.read()?.iter().any(|doc| doc.id() == id))
    }

    fn delete_by_id(&self, id: Uuid) -> StoreResult<()> {
        self.write()?.retain(|doc| doc.id() != id);
        Ok(())
    }
}
