//! Behaviour every ListStore must share, run against each backend

use listapi_server::{ListStore, StoreError};

/// Drive a fresh, empty store through the full item lifecycle.
///
/// `absent_id` must be well-formed for the backend but never assigned;
/// `malformed_id` must not parse as the backend's id type.
pub async fn exercise_store(store: &dyn ListStore, absent_id: &str, malformed_id: &str) {
    assert!(store.list_all().await.unwrap().is_empty());

    // create then read
    let created = store.create("groceries").await.unwrap();
    assert_eq!(created.list, "groceries");
    let id = created.id.to_string();
    assert_eq!(store.parse_id(&id).unwrap(), created.id);
    assert_eq!(store.read_one(&id).await.unwrap(), created);

    // the empty string is a value, not an absence
    let blank = store.create("").await.unwrap();
    assert_eq!(store.read_one(&blank.id.to_string()).await.unwrap().list, "");

    // update keeps identity and is idempotent
    let once = store.update(&id, "groceries v2").await.unwrap();
    assert_eq!(once.id, created.id);
    assert_eq!(once.list, "groceries v2");
    let twice = store.update(&id, "groceries v2").await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(store.read_one(&id).await.unwrap(), twice);

    // delete is terminal
    store.delete(&id).await.unwrap();
    assert!(matches!(store.read_one(&id).await, Err(StoreError::NotFound { .. })));
    assert!(matches!(store.update(&id, "x").await, Err(StoreError::NotFound { .. })));
    assert!(matches!(store.delete(&id).await, Err(StoreError::NotFound { .. })));
    store.delete(&blank.id.to_string()).await.unwrap();

    // list completeness
    let mut created = Vec::new();
    for n in 0..5 {
        created.push(store.create(&format!("item {}", n)).await.unwrap());
    }
    let mut listed = store.list_all().await.unwrap();
    assert_eq!(listed.len(), created.len());
    listed.sort_by_key(|item| item.list.clone());
    assert_eq!(listed, created);

    // ids that were never handed out
    assert!(matches!(store.read_one(absent_id).await, Err(StoreError::NotFound { .. })));
    assert!(matches!(store.update(absent_id, "x").await, Err(StoreError::NotFound { .. })));
    assert!(matches!(store.delete(absent_id).await, Err(StoreError::NotFound { .. })));

    // ids the backend cannot parse
    assert!(matches!(store.parse_id(malformed_id), Err(StoreError::MalformedId { .. })));
    assert!(matches!(store.read_one(malformed_id).await, Err(StoreError::MalformedId { .. })));
    assert!(matches!(
        store.update(malformed_id, "x").await,
        Err(StoreError::MalformedId { .. })
    ));
    assert!(matches!(store.delete(malformed_id).await, Err(StoreError::MalformedId { .. })));
}
