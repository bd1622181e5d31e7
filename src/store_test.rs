use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

use super::*;

fn scratch_dir() -> PathBuf {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("rectboard-store-{}-{n}", std::process::id()))
}

// =============================================================================
// JsonFileStore
// =============================================================================

#[tokio::test]
async fn file_store_missing_key_is_none() {
    let store = JsonFileStore::new(scratch_dir());
    assert!(store.get("rectangle").await.unwrap().is_none());
}

#[tokio::test]
async fn file_store_put_then_get() {
    let dir = scratch_dir();
    let store = JsonFileStore::new(&dir);
    let value = json!({ "x": 1, "y": 2 });
    store.put("rectangle", &value).await.unwrap();
    assert_eq!(store.get("rectangle").await.unwrap(), Some(value));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn file_store_writes_pretty_json_at_key_path() {
    let dir = scratch_dir();
    let store = JsonFileStore::new(&dir);
    store.put("rectangle", &json!({ "canvasWidth": 600 })).await.unwrap();

    let text = std::fs::read_to_string(dir.join("rectangle.json")).unwrap();
    assert!(text.contains('\n'));
    assert!(text.contains("\"canvasWidth\": 600"));
    assert!(!dir.join("rectangle.json.tmp").exists());
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn file_store_overwrites_wholesale() {
    let dir = scratch_dir();
    let store = JsonFileStore::new(&dir);
    store.put("rectangle", &json!({ "a": 1, "b": 2 })).await.unwrap();
    store.put("rectangle", &json!({ "a": 3 })).await.unwrap();
    assert_eq!(store.get("rectangle").await.unwrap(), Some(json!({ "a": 3 })));
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn file_store_corrupt_file_is_json_error() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("rectangle.json"), "{ not json").unwrap();

    let store = JsonFileStore::new(&dir);
    let err = store.get("rectangle").await.unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
    let _ = std::fs::remove_dir_all(dir);
}

// =============================================================================
// MemoryStore
// =============================================================================

#[tokio::test]
async fn memory_store_keys_are_independent() {
    let store = MemoryStore::new();
    store.put("a", &json!(1)).await.unwrap();
    store.put("b", &json!(2)).await.unwrap();
    assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
    assert_eq!(store.get("b").await.unwrap(), Some(json!(2)));
    assert!(store.get("c").await.unwrap().is_none());
}
