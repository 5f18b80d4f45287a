//! MongoDB-backed document store.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, doc};
use mongodb::{Client, Collection};

use super::{Document, DocumentId, DocumentStore, StoreError, StoredDocument};

/// One MongoDB collection.
///
/// The driver pools connections internally; the client is created once and
/// cloned cheaply.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: String,
    collection: Collection<bson::Document>,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection(collection);
        Ok(Self { client, database: database.to_owned(), collection })
    }
}

fn object_id(id: &DocumentId) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.to_hex()).map_err(|e| StoreError::Backend(e.to_string()))
}

fn document_id(oid: &ObjectId) -> Result<DocumentId, StoreError> {
    DocumentId::parse(&oid.to_hex()).map_err(|e| StoreError::Backend(e.to_string()))
}

fn to_bson(fields: Document) -> Result<bson::Document, StoreError> {
    bson::to_document(&fields).map_err(|e| StoreError::Backend(e.to_string()))
}

fn from_bson(mut raw: bson::Document) -> Result<StoredDocument, StoreError> {
    let oid = raw.get_object_id("_id").map_err(|e| StoreError::Backend(e.to_string()))?;
    let id = document_id(&oid)?;
    raw.remove("_id");
    let fields = bson::from_document::<Document>(raw)
        .map_err(|e| StoreError::Decode { id, reason: e.to_string() })?;
    Ok(StoredDocument { id, fields })
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self) -> Result<Vec<StoredDocument>, StoreError> {
        let raw: Vec<bson::Document> = self.collection.find(doc! {}).await?.try_collect().await?;
        raw.into_iter().map(from_bson).collect()
    }

    async fn find_one(&self, id: &DocumentId) -> Result<Option<StoredDocument>, StoreError> {
        let filter = doc! { "_id": object_id(id)? };
        self.collection.find_one(filter).await?.map(from_bson).transpose()
    }

    async fn insert_one(&self, fields: Document) -> Result<DocumentId, StoreError> {
        let inserted = self.collection.insert_one(to_bson(fields)?).await?;
        match inserted.inserted_id {
            Bson::ObjectId(oid) => document_id(&oid),
            other => Err(StoreError::Backend(format!("unexpected inserted id {other}"))),
        }
    }

    async fn update_one(&self, id: &DocumentId, set: Document) -> Result<bool, StoreError> {
        let filter = doc! { "_id": object_id(id)? };
        let update = doc! { "$set": to_bson(set)? };
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, id: &DocumentId) -> Result<bool, StoreError> {
        let filter = doc! { "_id": object_id(id)? };
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client.database(&self.database).run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
