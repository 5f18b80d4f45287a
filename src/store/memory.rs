//! Process-local document store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentId, DocumentStore, StoreError, StoredDocument};

/// A single collection held in memory.
///
/// Documents are keyed by id in a `BTreeMap`, so `find` returns them in
/// creation order. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<DocumentId, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self) -> Result<Vec<StoredDocument>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.iter()
            .map(|(id, fields)| StoredDocument { id: *id, fields: fields.clone() })
            .collect())
    }

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.get(id).map(|fields| StoredDocument { id: *id, fields: fields.clone() }))
    }

    async fn insert_one(&self, fields: Document) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        self.docs.write().await.insert(id, fields);
        Ok(id)
    }

    async fn update_one(&self, id: &DocumentId, set: Document) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.get_mut(id) else {
            return Ok(false);
        };
        doc.extend(set);
        Ok(true)
    }

    async fn delete_one(&self, id: &DocumentId) -> Result<bool, StoreError> {
        Ok(self.docs.write().await.remove(id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
