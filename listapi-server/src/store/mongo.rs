//! MongoDB list store
//!
//! Documents are `{ _id: ObjectId, list: String }`. The `_id` is assigned
//! by the driver on insert, never by the handler.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use super::{object_id, parse_object_id, Backend, ListStore, StoreError};
use crate::models::{ItemId, ListItem, StorageName};

/// Stored document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    list: String,
}

impl From<ListDocument> for ListItem {
    fn from(doc: ListDocument) -> Self {
        ListItem::new(doc.id, doc.list)
    }
}

/// List store over a single MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoListStore {
    collection: Collection<ListDocument>,
}

impl MongoListStore {
    /// Connect to `uri` and bind to `database.collection`.
    ///
    /// `max_connections` caps the driver's connection pool.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &StorageName,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.max_pool_size = Some(max_connections.max(1));
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        // Fail at startup rather than on the first request
        client
            .database(database)
            .run_command(doc! { "ping": 1 })
            .await?;

        tracing::info!(database, %collection, max_connections, "connected to MongoDB");
        Ok(Self {
            collection: client.database(database).collection(collection.as_str()),
        })
    }

    fn filter(id: ObjectId) -> Document {
        doc! { "_id": id }
    }
}

#[async_trait]
impl ListStore for MongoListStore {
    fn backend(&self) -> Backend {
        Backend::Mongo
    }

    fn parse_id(&self, raw: &str) -> Result<ItemId, StoreError> {
        parse_object_id(raw).map(ItemId::Object)
    }

    async fn create(&self, list: &str) -> Result<ListItem, StoreError> {
        let result = self
            .collection
            .clone_with_type::<Document>()
            .insert_one(doc! { "list": list })
            .await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend(format!(
                "inserted _id is not an ObjectId: {}",
                result.inserted_id
            ))
        })?;

        tracing::debug!(id = %id, "inserted list item");
        Ok(ListItem::new(id, list))
    }

    async fn list_all(&self) -> Result<Vec<ListItem>, StoreError> {
        let docs: Vec<ListDocument> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(ListItem::from).collect())
    }

    async fn read_one(&self, id: &str) -> Result<ListItem, StoreError> {
        let oid = object_id(self, id)?;
        self.collection
            .find_one(Self::filter(oid))
            .await?
            .map(ListItem::from)
            .ok_or_else(|| StoreError::not_found(oid.to_hex()))
    }

    async fn update(&self, id: &str, list: &str) -> Result<ListItem, StoreError> {
        let oid = object_id(self, id)?;
        let updated = self
            .collection
            .find_one_and_update(Self::filter(oid), doc! { "$set": { "list": list } })
            .return_document(ReturnDocument::After)
            .await?;

        tracing::debug!(id = %oid, updated = updated.is_some(), "update list item");
        updated
            .map(ListItem::from)
            .ok_or_else(|| StoreError::not_found(oid.to_hex()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = object_id(self, id)?;
        let result = self.collection.delete_one(Self::filter(oid)).await?;

        if result.deleted_count == 0 {
            return Err(StoreError::not_found(oid.to_hex()));
        }

        tracing::debug!(id = %oid, "deleted list item");
        Ok(())
    }
}
