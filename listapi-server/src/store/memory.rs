//! In-process list store
//!
//! Serial integer ids starting at 1, ascending iteration order. Ids are
//! never reused after a delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{parse_serial_id, serial_id, Backend, ListStore, StoreError};
use crate::models::{ItemId, ListItem};

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    items: BTreeMap<i32, String>,
}

/// List store kept in memory for tests and local development
#[derive(Debug, Default)]
pub struct MemoryListStore {
    inner: RwLock<Inner>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live items
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn parse_id(&self, raw: &str) -> Result<ItemId, StoreError> {
        parse_serial_id(raw).map(ItemId::Serial)
    }

    async fn create(&self, list: &str) -> Result<ListItem, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("id sequence exhausted".into()))?;
        inner.last_id = id;
        inner.items.insert(id, list.to_owned());
        Ok(ListItem::new(id, list))
    }

    async fn list_all(&self) -> Result<Vec<ListItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .items
            .iter()
            .map(|(id, list)| ListItem::new(*id, list.as_str()))
            .collect())
    }

    async fn read_one(&self, id: &str) -> Result<ListItem, StoreError> {
        let id = serial_id(self, id)?;
        let inner = self.inner.read().await;
        inner
            .items
            .get(&id)
            .map(|list| ListItem::new(id, list.as_str()))
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn update(&self, id: &str, list: &str) -> Result<ListItem, StoreError> {
        let id = serial_id(self, id)?;
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(&id) {
            Some(stored) => {
                *stored = list.to_owned();
                Ok(ListItem::new(id, list))
            }
            None => Err(StoreError::not_found(id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = serial_id(self, id)?;
        self.inner
            .write()
            .await
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }
}
