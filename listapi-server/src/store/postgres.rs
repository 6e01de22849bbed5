//! PostgreSQL list store
//!
//! Table layout: `id SERIAL PRIMARY KEY, list TEXT NOT NULL`.
//! Every operation is a single statement, so no explicit transactions.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use super::{parse_serial_id, serial_id, Backend, ListStore, StoreError};
use crate::models::{ItemId, ListItem, StorageName};

/// Row shape returned by every query
#[derive(Debug, Clone, FromRow)]
struct ListRow {
    id: i32,
    list: String,
}

impl From<ListRow> for ListItem {
    fn from(row: ListRow) -> Self {
        ListItem::new(row.id, row.list)
    }
}

/// SQL text for one table, built once at construction
#[derive(Debug, Clone)]
struct Queries {
    insert: String,
    select_all: String,
    select_one: String,
    update: String,
    delete: String,
    create_table: String,
}

impl Queries {
    fn for_table(table: &StorageName) -> Self {
        Self {
            insert: format!("INSERT INTO {table} (list) VALUES ($1) RETURNING id, list"),
            select_all: format!("SELECT id, list FROM {table} ORDER BY id"),
            select_one: format!("SELECT id, list FROM {table} WHERE id = $1"),
            update: format!("UPDATE {table} SET list = $1 WHERE id = $2 RETURNING id, list"),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {table} (id SERIAL PRIMARY KEY, list TEXT NOT NULL)"
            ),
        }
    }
}

/// List store over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgListStore {
    pool: PgPool,
    queries: Queries,
}

impl PgListStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool, table: StorageName) -> Self {
        Self {
            pool,
            queries: Queries::for_table(&table),
        }
    }

    /// Open a pool against `database_url` with at most `max_connections`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let table = StorageName::new("lists")?;
    /// let store = PgListStore::connect("postgresql://localhost/listdb", table, 5).await?;
    /// ```
    pub async fn connect(
        database_url: &str,
        table: StorageName,
        max_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect(database_url)
            .await?;

        tracing::info!(%table, max_connections, "connected to PostgreSQL");
        Ok(Self::new(pool, table))
    }

    /// Create the backing table if it does not exist yet.
    pub async fn create_table(&self) -> Result<(), StoreError> {
        sqlx::query(&self.queries.create_table)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ListStore for PgListStore {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn parse_id(&self, raw: &str) -> Result<ItemId, StoreError> {
        parse_serial_id(raw).map(ItemId::Serial)
    }

    async fn create(&self, list: &str) -> Result<ListItem, StoreError> {
        let row: ListRow = sqlx::query_as(&self.queries.insert)
            .bind(list)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(id = row.id, "inserted list item");
        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<ListItem>, StoreError> {
        let rows: Vec<ListRow> = sqlx::query_as(&self.queries.select_all)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ListItem::from).collect())
    }

    async fn read_one(&self, id: &str) -> Result<ListItem, StoreError> {
        let id = serial_id(self, id)?;
        let row: Option<ListRow> = sqlx::query_as(&self.queries.select_one)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ListItem::from)
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn update(&self, id: &str, list: &str) -> Result<ListItem, StoreError> {
        let id = serial_id(self, id)?;
        // RETURNING gives read-after-write in the same statement
        let row: Option<ListRow> = sqlx::query_as(&self.queries.update)
            .bind(list)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(id, updated = row.is_some(), "update list item");
        row.map(ListItem::from)
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let id = serial_id(self, id)?;
        let result = sqlx::query(&self.queries.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }

        tracing::debug!(id, "deleted list item");
        Ok(())
    }
}
