//! listapi-server: CRUD HTTP service for list items
//!
//! One resource (`/lists`), four operations, and a pluggable storage
//! backend: PostgreSQL, MongoDB, or an in-memory store.

pub mod http;
pub mod models;
pub mod store;

pub use http::{build_router, run_server, ServerConfig};
pub use models::{ItemId, ListItem};
pub use store::{connect, Backend, ListStore, StoreConfig, StoreError};
