//! End-to-end HTTP behaviour through the router, backed by the memory store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use listapi_server::store::{Backend, MemoryListStore};
use listapi_server::{build_router, ItemId, ListItem, ListStore, StoreError};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(Arc::new(MemoryListStore::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}

fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn groceries_scenario() {
    let app = app();

    let (status, headers, created) =
        send(&app, Method::POST, "/lists", Some(r#"{"list":"groceries"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_cors(&headers);
    let id = created["id"].clone();
    assert_eq!(created, json!({"id": id, "list": "groceries"}));

    let uri = format!("/lists/{}", id);

    let (status, _, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "list": "groceries"}));

    let (status, _, body) =
        send(&app, Method::PUT, &uri, Some(r#"{"list":"groceries v2"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "list": "groceries v2"}));

    let (status, headers, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_cors(&headers);
    assert_eq!(body, json!({"status": "item deleted"}));

    let (status, headers, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_cors(&headers);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn list_all_starts_empty_and_is_complete() {
    let app = app();

    let (status, _, body) = send(&app, Method::GET, "/lists", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    for text in ["a", "b", "c"] {
        let body = json!({ "list": text }).to_string();
        let (status, _, _) = send(&app, Method::POST, "/lists", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _, body) = send(&app, Method::GET, "/lists", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "list": "a"},
            {"id": 2, "list": "b"},
            {"id": 3, "list": "c"},
        ])
    );
}

#[tokio::test]
async fn rejects_invalid_bodies() {
    let app = app();

    let cases = [
        ("{}", "Missing 'list' field"),
        (r#"{"list": 5}"#, "Missing 'list' field"),
        (r#"{"items": "x"}"#, "Missing 'list' field"),
        ("{\"list\": ", "Invalid JSON"),
        ("not json", "Invalid JSON"),
    ];

    for (body, message) in cases {
        let (status, headers, json) = send(&app, Method::POST, "/lists", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "POST {}", body);
        assert_cors(&headers);
        assert_eq!(json, json!({ "error": message }), "POST {}", body);
    }

    send(&app, Method::POST, "/lists", Some(r#"{"list":"keep"}"#)).await;
    for (body, message) in cases {
        let (status, _, json) = send(&app, Method::PUT, "/lists/1", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT {}", body);
        assert_eq!(json, json!({ "error": message }));
    }

    // nothing reached the store
    let (_, _, body) = send(&app, Method::GET, "/lists", None).await;
    assert_eq!(body, json!([{"id": 1, "list": "keep"}]));
}

#[tokio::test]
async fn accepts_empty_string_and_ignores_extra_fields() {
    let app = app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/lists",
        Some(r#"{"list":"","id":99,"extra":[1,2]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "list": ""}));
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/lists")
        .body(Body::from(r#"{"list":"plain"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_id_is_client_error() {
    let app = app();

    for method in [Method::GET, Method::DELETE] {
        let (status, _, body) = send(&app, method.clone(), "/lists/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", method);
        assert!(body["error"].as_str().unwrap().contains("invalid list item id"));
    }

    let (status, _, _) = send(&app, Method::PUT, "/lists/abc", Some(r#"{"list":"x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_items_are_not_found() {
    let app = app();

    let (status, _, _) = send(&app, Method::GET, "/lists/41", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::PUT, "/lists/41", Some(r#"{"list":"x"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, body) = send(&app, Method::DELETE, "/lists/41", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "list item '41' not found"}));
}

#[tokio::test]
async fn options_is_answered_on_any_path() {
    let app = app();

    for uri in ["/lists", "/lists/1", "/anything/at/all"] {
        let (status, headers, body) = send(&app, Method::OPTIONS, uri, None).await;
        assert_eq!(status, StatusCode::OK, "OPTIONS {}", uri);
        assert_cors(&headers);
        assert_eq!(body, Value::Null);
    }
}

#[tokio::test]
async fn unknown_endpoints_are_404() {
    let app = app();

    let cases = [
        (Method::GET, "/"),
        (Method::GET, "/items"),
        (Method::GET, "/lists/1/extra"),
        (Method::DELETE, "/lists"),
        (Method::PUT, "/lists"),
        (Method::POST, "/lists/1"),
        (Method::PATCH, "/lists/1"),
    ];

    for (method, uri) in cases {
        let (status, headers, body) = send(&app, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_cors(&headers);
        assert_eq!(body, json!({"error": "unknown endpoint"}), "{} {}", method, uri);
    }
}

#[tokio::test]
async fn head_is_not_served_from_get() {
    let app = app();
    send(&app, Method::POST, "/lists", Some(r#"{"list":"exists"}"#)).await;

    // HEAD responses carry no body, so only the status and headers are checked
    for uri in ["/lists", "/lists/1"] {
        let (status, headers, _) = send(&app, Method::HEAD, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "HEAD {}", uri);
        assert_cors(&headers);
    }

    let (status, _, _) = send(&app, Method::GET, "/lists/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

/// Store whose every call fails, as a dropped database connection would
struct BrokenStore;

#[async_trait]
impl ListStore for BrokenStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    fn parse_id(&self, raw: &str) -> Result<ItemId, StoreError> {
        Ok(ItemId::Serial(raw.parse().unwrap_or_default()))
    }

    async fn create(&self, _: &str) -> Result<ListItem, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn list_all(&self) -> Result<Vec<ListItem>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn read_one(&self, _: &str) -> Result<ListItem, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn update(&self, _: &str, _: &str) -> Result<ListItem, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn delete(&self, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn storage_failures_are_500_with_backend_text() {
    let app = build_router(Arc::new(BrokenStore));

    let requests = [
        (Method::GET, "/lists", None),
        (Method::POST, "/lists", Some(r#"{"list":"x"}"#)),
        (Method::GET, "/lists/1", None),
        (Method::PUT, "/lists/1", Some(r#"{"list":"x"}"#)),
        (Method::DELETE, "/lists/1", None),
    ];

    for (method, uri, body) in requests {
        let (status, headers, json) = send(&app, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_cors(&headers);
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Database error:"), "{}", message);
        assert!(message.contains("connection refused"), "{}", message);
    }
}

#[tokio::test]
async fn validation_runs_before_storage() {
    let app = build_router(Arc::new(BrokenStore));

    let (status, _, body) = send(&app, Method::POST, "/lists", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing 'list' field"}));
}
