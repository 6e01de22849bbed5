//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::ApiError;
use crate::models::ValidationError;

/// The `list` text of a POST/PUT body.
///
/// The body must parse as JSON and carry a string `list` key. Other keys are
/// ignored; `Content-Type` is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBody(pub String);

impl ListBody {
    pub fn parse(bytes: &[u8]) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|_| ValidationError::InvalidJson)?;

        value
            .get("list")
            .and_then(Value::as_str)
            .map(|list| Self(list.to_owned()))
            .ok_or(ValidationError::MissingField { field: "list" })
    }
}

impl<S> FromRequest<S> for ListBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BodyRejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self::parse(&bytes)?)
    }
}

/// The raw `{id}` path segment.
///
/// Kept as a string: whether it is a valid id is up to the active store.
#[derive(Debug, Clone)]
pub struct RawId(pub String);

impl<S> FromRequestParts<S> for RawId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::MalformedId {
                message: rejection.body_text(),
            })?;

        Ok(Self(id))
    }
}
