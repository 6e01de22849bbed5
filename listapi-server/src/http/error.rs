//! API error types with IntoResponse
//!
//! Every error becomes a JSON body of the form `{"error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed validation (400)
    Validation(ValidationError),

    /// Body could not be read at all (e.g. over the size limit)
    BodyRejected { status: StatusCode, message: String },

    /// Path id is not a valid id for the active backend (400)
    MalformedId { message: String },

    /// No live item with this id (404)
    NotFound { message: String },

    /// Route/method combination not served (404)
    UnknownEndpoint,

    /// Backend failure (500, logged)
    Storage(StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedId { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::UnknownEndpoint => StatusCode::NOT_FOUND,
            Self::BodyRejected { status, .. } => *status,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::BodyRejected { message, .. }
            | Self::MalformedId { message }
            | Self::NotFound { message } => message.clone(),
            Self::UnknownEndpoint => "unknown endpoint".to_string(),
            Self::Storage(e) => format!("Database error: {}", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Storage(e) = &self {
            tracing::error!("Database error: {}", e);
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound {
                message: e.to_string(),
            },
            StoreError::MalformedId { .. } => Self::MalformedId {
                message: e.to_string(),
            },
            _ => Self::Storage(e),
        }
    }
}
