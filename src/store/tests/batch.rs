//! Multi-key batched write tests for KvStore.

use super::file_backed_store;
use crate::store::{KvStore, StoreUpdate};
use serde_json::json;

#[tokio::test]
async fn test_set_many_writes_all_keys() {
    let store = KvStore::in_memory();
    store
        .set_many(vec![
            ("todos".to_string(), json!([])),
            ("notes".to_string(), json!("n")),
            ("compactMode".to_string(), json!(true)),
        ])
        .await
        .unwrap();

    assert_eq!(store.get("todos").await, Some(json!([])));
    assert_eq!(store.get("notes").await, Some(json!("n")));
    assert_eq!(store.get("compactMode").await, Some(json!(true)));
}

#[tokio::test]
async fn test_set_many_empty_batch_is_noop() {
    let store = KvStore::in_memory();
    let mut rx = store.subscribe();

    store.set_many(vec![]).await.unwrap();

    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn test_set_many_notifies_once_per_key() {
    let store = KvStore::in_memory();
    let mut rx = store.subscribe();

    store
        .set_many(vec![
            ("quoteCache".to_string(), json!({})),
            ("widgetLayout".to_string(), json!({})),
        ])
        .await
        .unwrap();

    assert_eq!(rx.recv().await.unwrap(), StoreUpdate { key: "quoteCache".into() });
    assert_eq!(rx.recv().await.unwrap(), StoreUpdate { key: "widgetLayout".into() });
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn test_set_many_persists_all_keys_together() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = file_backed_store(&dir);
        store
            .set_many(vec![
                ("googleAppsPage".to_string(), json!(1)),
                ("googleApps".to_string(), json!([])),
            ])
            .await
            .unwrap();
    }

    let reopened = file_backed_store(&dir);
    assert_eq!(reopened.get("googleAppsPage").await, Some(json!(1)));
    assert_eq!(reopened.get("googleApps").await, Some(json!([])));
}
