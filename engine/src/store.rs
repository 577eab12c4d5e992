use std::collections::BTreeMap;

use crate::document::{DocumentInfo, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::DocId;

/// Per-document metadata keyed by id. Entries are immutable once inserted.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: BTreeMap<DocId, DocumentInfo>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails unless `id` is non-negative and not yet stored.
    pub fn check_new_id(&self, id: DocId) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidId(id));
        }
        if self.docs.contains_key(&id) {
            return Err(SearchError::DuplicateId(id));
        }
        Ok(())
    }

    pub fn insert(&mut self, id: DocId, status: DocumentStatus, rating: i32, word_count: usize) {
        self.docs.insert(id, DocumentInfo { id, status, rating, word_count });
    }

    pub fn get(&self, id: DocId) -> Result<&DocumentInfo> {
        self.docs.get(&id).ok_or(SearchError::DocumentNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.keys().copied()
    }
}
