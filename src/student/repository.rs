//! Data access for students.
//!
//! Each operation is one or two calls against the shared collection.
//! Update and delete look the record up before acting so they can report
//! whether it existed. Check and act are two separate store calls: a
//! concurrent delete in between is tolerated and yields a stale `true`.

use std::sync::Arc;

use tracing::debug;

use crate::store::{DocumentId, DocumentStore, StoreError};

use super::{NewStudent, Student, StudentPatch};

/// Student operations over one document collection.
#[derive(Clone)]
pub struct StudentRepository {
    collection: Arc<dyn DocumentStore>,
}

impl StudentRepository {
    pub fn new(collection: Arc<dyn DocumentStore>) -> Self {
        Self { collection }
    }

    /// Every student, in store order.
    pub async fn list_all(&self) -> Result<Vec<Student>, StoreError> {
        self.collection.find().await?
            .into_iter()
            .map(Student::from_stored)
            .collect()
    }

    /// Inserts `data` and returns the record as the store now holds it.
    pub async fn create(&self, data: NewStudent) -> Result<Student, StoreError> {
        let id = self.collection.insert_one(data.into_document()).await?;
        let stored = self.collection.find_one(&id).await?
            .ok_or(StoreError::Vanished(id))?;
        debug!(%id, "student created");
        Student::from_stored(stored)
    }

    /// Looks up one student. Ids that do not parse are simply not found.
    pub async fn get(&self, id: &str) -> Result<Option<Student>, StoreError> {
        let Ok(id) = DocumentId::parse(id) else {
            return Ok(None);
        };
        self.collection.find_one(&id).await?
            .map(Student::from_stored)
            .transpose()
    }

    /// Applies `patch` to an existing student.
    ///
    /// Returns `false` without writing when the patch is empty, the id is
    /// malformed, or no such student exists. `true` means the student
    /// existed, not that any value changed.
    pub async fn update(&self, id: &str, patch: StudentPatch) -> Result<bool, StoreError> {
        if patch.is_empty() {
            return Ok(false);
        }
        let Ok(id) = DocumentId::parse(id) else {
            return Ok(false);
        };
        if self.collection.find_one(&id).await?.is_none() {
            return Ok(false);
        }
        self.collection.update_one(&id, patch.into_document()).await?;
        debug!(%id, "student updated");
        Ok(true)
    }

    /// Removes a student. Returns whether one was there to remove.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(id) = DocumentId::parse(id) else {
            return Ok(false);
        };
        if self.collection.find_one(&id).await?.is_none() {
            return Ok(false);
        }
        self.collection.delete_one(&id).await?;
        debug!(%id, "student deleted");
        Ok(true)
    }

    /// Round-trips to the underlying store.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.collection.ping().await
    }
}
