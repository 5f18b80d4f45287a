//! Store doubles shared by unit tests across modules.

use async_trait::async_trait;

use super::{Document, DocumentId, DocumentStore, StoreError, StoredDocument};

fn reset() -> StoreError {
    StoreError::Backend("connection reset".to_owned())
}

/// A store whose every call fails, like a dropped connection.
pub(crate) struct DownStore;

#[async_trait]
impl DocumentStore for DownStore {
    async fn find(&self) -> Result<Vec<StoredDocument>, StoreError> {
        Err(reset())
    }
    async fn find_one(&self, _: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        Err(reset())
    }
    async fn insert_one(&self, _: Document) -> Result<DocumentId, StoreError> {
        Err(reset())
    }
    async fn update_one(&self, _: &DocumentId, _: Document) -> Result<bool, StoreError> {
        Err(reset())
    }
    async fn delete_one(&self, _: &DocumentId) -> Result<bool, StoreError> {
        Err(reset())
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(reset())
    }
}
