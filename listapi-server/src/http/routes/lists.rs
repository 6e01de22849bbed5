//! List item endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::unknown_endpoint;
use crate::http::error::ApiError;
use crate::http::extractors::{ListBody, RawId};
use crate::http::server::AppState;
use crate::models::ListItem;

/// Delete confirmation body
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

/// GET /lists - every stored item
async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ListItem>>, ApiError> {
    let items = state.store.list_all().await?;
    Ok(Json(items))
}

/// POST /lists - create an item
async fn create_item(
    State(state): State<Arc<AppState>>,
    ListBody(list): ListBody,
) -> Result<(StatusCode, Json<ListItem>), ApiError> {
    let item = state.store.create(&list).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /lists/{id} - a single item
async fn read_item(
    State(state): State<Arc<AppState>>,
    RawId(id): RawId,
) -> Result<Json<ListItem>, ApiError> {
    let item = state.store.read_one(&id).await?;
    Ok(Json(item))
}

/// PUT /lists/{id} - replace an item's text
async fn update_item(
    State(state): State<Arc<AppState>>,
    RawId(id): RawId,
    ListBody(list): ListBody,
) -> Result<Json<ListItem>, ApiError> {
    let item = state.store.update(&id, &list).await?;
    Ok(Json(item))
}

/// DELETE /lists/{id} - remove an item
async fn delete_item(
    State(state): State<Arc<AppState>>,
    RawId(id): RawId,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.delete(&id).await?;
    Ok(Json(DeletedResponse {
        status: "item deleted",
    }))
}

/// List item routes. Unsupported methods fall through to "unknown endpoint".
///
/// HEAD is registered explicitly, otherwise axum would serve it from the GET
/// handler.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/lists",
            get(list_items)
                .head(unknown_endpoint)
                .post(create_item)
                .fallback(unknown_endpoint),
        )
        .route(
            "/lists/{id}",
            get(read_item)
                .head(unknown_endpoint)
                .put(update_item)
                .delete(delete_item)
                .fallback(unknown_endpoint),
        )
}
