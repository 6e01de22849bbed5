//! HTTP server layer
//!
//! Axum server with:
//! - CORS headers on every response, OPTIONS answered on any path
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod cors;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
