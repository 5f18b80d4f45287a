//! Document store abstraction.
//!
//! A store is one collection of schema-flexible JSON documents addressed by
//! a store-assigned [`DocumentId`]. The trait mirrors the driver primitives
//! the data-access layer needs and nothing more: `find`, `find_one`,
//! `insert_one`, `update_one`, `delete_one`, plus a `ping` for readiness.
//!
//! Backends:
//!
//! | URL scheme | Backend |
//! |---|---|
//! | `memory://` | [`MemoryStore`], process-local |
//! | `mongodb://`, `mongodb+srv://` | `MongoStore`, behind the `mongodb` feature |

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

mod id;
mod memory;
#[cfg(feature = "mongodb")]
mod mongo;
#[cfg(test)]
pub(crate) mod testing;

pub use id::{DocumentId, InvalidId};
pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

/// Field map of one document, without its id.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A document as read back from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub fields: Document,
}

/// Failures of the store itself. "Not found" is never one of these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend: {0}")]
    Backend(String),

    #[error("document {id} could not be decoded: {reason}")]
    Decode { id: DocumentId, reason: String },

    #[error("document {0} vanished right after insert")]
    Vanished(DocumentId),

    #[cfg(feature = "mongodb")]
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// One collection in a document store.
///
/// Every method is a suspension point; implementations must be shareable
/// across concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document, in store-native order.
    async fn find(&self) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError>;

    /// Inserts `fields` and returns the id the store assigned.
    async fn insert_one(&self, fields: Document) -> Result<DocumentId, StoreError>;

    /// Overwrites only the keys present in `set`. Returns whether a document matched.
    async fn update_one(&self, id: &DocumentId, set: Document) -> Result<bool, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_one(&self, id: &DocumentId) -> Result<bool, StoreError>;

    /// Round-trips to the backend.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Where the collection lives, parsed from a connection URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreUrl {
    Memory,
    Mongo(String),
}

impl StoreUrl {
    pub fn parse(url: &str) -> Result<Self, crate::Error> {
        match url.split_once("://") {
            Some(("memory", _)) => Ok(Self::Memory),
            Some(("mongodb" | "mongodb+srv", _)) => Ok(Self::Mongo(url.to_owned())),
            _ => Err(crate::Error::Config(format!(
                "unsupported database url `{url}`: expected memory:// or mongodb://"
            ))),
        }
    }
}

/// Opens the collection named by `url`, `database` and `collection`.
///
/// Called once at startup; the returned handle is shared for the process
/// lifetime.
pub async fn connect(
    url: &StoreUrl,
    database: &str,
    collection: &str,
) -> Result<Arc<dyn DocumentStore>, crate::Error> {
    match url {
        StoreUrl::Memory => {
            tracing::info!(database, collection, "using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "mongodb")]
        StoreUrl::Mongo(uri) => {
            let store = MongoStore::connect(uri, database, collection).await?;
            tracing::info!(database, collection, "connected to mongodb");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb"))]
        StoreUrl::Mongo(_) => Err(crate::Error::Config(
            "mongodb url given but registrar was built without the `mongodb` feature".to_owned(),
        )),
    }
}
