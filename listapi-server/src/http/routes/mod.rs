//! Route handlers organized by resource

pub mod lists;

use super::error::ApiError;

/// Fallback for every path/method the service does not serve
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}
