//! Storage adapters for list items
//!
//! Every backend implements [`ListStore`]. The HTTP layer only ever sees an
//! `Arc<dyn ListStore>`, selected once at startup from a [`StoreConfig`].
//!
//! Ids arrive as the raw path segment; each adapter decides whether the
//! string is a well-formed id for its backend and reports
//! [`StoreError::MalformedId`] otherwise.

pub mod memory;
pub mod mongo;
pub mod postgres;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{ItemId, ListItem, StorageName};

pub use memory::MemoryListStore;
pub use mongo::MongoListStore;
pub use postgres::PgListStore;

/// Default pool size for either database backend.
/// A size of 1 serializes all database calls through a single connection.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Postgres(#[from] sqlx::Error),

    #[error("{0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("list item '{id}' not found")]
    NotFound { id: String },

    #[error("invalid list item id '{id}': {reason}")]
    MalformedId { id: String, reason: &'static str },

    #[error("unexpected backend response: {0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn not_found(id: impl fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// CRUD over the single list item collection/table
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Which backend this adapter talks to
    fn backend(&self) -> Backend;

    /// Parse a raw path segment into this backend's id type
    fn parse_id(&self, raw: &str) -> Result<ItemId, StoreError>;

    /// Insert one item; the backend assigns the id
    async fn create(&self, list: &str) -> Result<ListItem, StoreError>;

    /// Every stored item. Serial backends return ascending id order.
    async fn list_all(&self) -> Result<Vec<ListItem>, StoreError>;

    async fn read_one(&self, id: &str) -> Result<ListItem, StoreError>;

    /// Replace `list` and return the item as stored after the write
    async fn update(&self, id: &str, list: &str) -> Result<ListItem, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Mongo,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mongo => "mongo",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!(
                "unknown backend '{}' (expected postgres, mongo or memory)",
                other
            )),
        }
    }
}

/// Connection settings for the selected backend
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        table: StorageName,
        max_connections: u32,
        /// Issue CREATE TABLE IF NOT EXISTS before serving
        create_table: bool,
    },
    Mongo {
        uri: String,
        database: String,
        collection: StorageName,
        max_connections: u32,
    },
    Memory,
}

impl StoreConfig {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Postgres { .. } => Backend::Postgres,
            Self::Mongo { .. } => Backend::Mongo,
            Self::Memory => Backend::Memory,
        }
    }
}

/// Build the configured store.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or the URI is invalid.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn ListStore>, StoreError> {
    let store: Arc<dyn ListStore> = match config {
        StoreConfig::Postgres {
            database_url,
            table,
            max_connections,
            create_table,
        } => {
            let store = PgListStore::connect(database_url, table.clone(), *max_connections).await?;
            if *create_table {
                store.create_table().await?;
            }
            Arc::new(store)
        }
        StoreConfig::Mongo {
            uri,
            database,
            collection,
            max_connections,
        } => Arc::new(MongoListStore::connect(uri, database, collection, *max_connections).await?),
        StoreConfig::Memory => Arc::new(MemoryListStore::new()),
    };

    tracing::info!(backend = %store.backend(), "list store ready");
    Ok(store)
}

/// Validate `raw` with the store's own [`ListStore::parse_id`] and keep the
/// serial form. Adapters call this instead of parsing ids themselves.
pub(crate) fn serial_id<S: ListStore + ?Sized>(store: &S, raw: &str) -> Result<i32, StoreError> {
    store
        .parse_id(raw)?
        .as_serial()
        .ok_or_else(|| StoreError::MalformedId {
            id: raw.to_owned(),
            reason: "expected an integer id",
        })
}

/// Object-id counterpart of [`serial_id`]
pub(crate) fn object_id<S: ListStore + ?Sized>(
    store: &S,
    raw: &str,
) -> Result<ObjectId, StoreError> {
    store
        .parse_id(raw)?
        .as_object_id()
        .ok_or_else(|| StoreError::MalformedId {
            id: raw.to_owned(),
            reason: "expected a 24-character hex object id",
        })
}

/// Parse a serial integer id (relational and in-memory backends)
pub(crate) fn parse_serial_id(raw: &str) -> Result<i32, StoreError> {
    raw.parse::<i32>().map_err(|_| StoreError::MalformedId {
        id: raw.to_owned(),
        reason: "expected an integer id",
    })
}

/// Parse a 24-char hex ObjectId (document backend)
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::MalformedId {
        id: raw.to_owned(),
        reason: "expected a 24-character hex object id",
    })
}
