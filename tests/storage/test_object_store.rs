// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Object storage tests: upsert semantics, path validation, public URLs

use bytes::Bytes;
use thumbforge::storage::{MockObjectStore, ObjectStorage, StorageError, SupabaseStorageClient};

#[tokio::test]
async fn test_put_then_get_roundtrip() {
    let store = MockObjectStore::new();
    store
        .put("favorites/a.webp", Bytes::from_static(b"data"), "image/webp")
        .await
        .unwrap();

    let data = store.get("favorites/a.webp").await.unwrap();
    assert_eq!(data, Bytes::from_static(b"data"));
}

#[tokio::test]
async fn test_put_same_path_overwrites() {
    let store = MockObjectStore::new();
    store
        .put("favorites/a.webp", Bytes::from_static(b"v1"), "image/webp")
        .await
        .unwrap();
    store
        .put("favorites/a.webp", Bytes::from_static(b"v2"), "image/webp")
        .await
        .unwrap();

    assert_eq!(store.object_count().await, 1);
    assert_eq!(store.get("favorites/a.webp").await.unwrap(), Bytes::from_static(b"v2"));
}

#[tokio::test]
async fn test_get_missing_object_is_not_found() {
    let store = MockObjectStore::new();
    assert!(matches!(
        store.get("favorites/missing.webp").await,
        Err(StorageError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_path_validation() {
    let store = MockObjectStore::new();

    let leading_slash = store
        .put("/favorites/a.webp", Bytes::from_static(b"x"), "image/webp")
        .await;
    assert!(matches!(leading_slash, Err(StorageError::InvalidPath(_))));

    let traversal = store
        .put("favorites/../secrets", Bytes::from_static(b"x"), "image/webp")
        .await;
    assert!(matches!(traversal, Err(StorageError::InvalidPath(_))));

    let empty = store.put("", Bytes::from_static(b"x"), "image/webp").await;
    assert!(matches!(empty, Err(StorageError::InvalidPath(_))));
}

#[tokio::test]
async fn test_delete_then_exists() {
    let store = MockObjectStore::new();
    store
        .put("favorites/a.webp", Bytes::from_static(b"data"), "image/webp")
        .await
        .unwrap();

    assert!(store.exists("favorites/a.webp").await.unwrap());
    store.delete("favorites/a.webp").await.unwrap();
    assert!(!store.exists("favorites/a.webp").await.unwrap());
}

#[tokio::test]
async fn test_injected_error_surfaces_once() {
    let store = MockObjectStore::new();
    store
        .inject_error(StorageError::Server("500".to_string()))
        .await;

    assert!(store
        .put("favorites/a.webp", Bytes::from_static(b"x"), "image/webp")
        .await
        .is_err());
    assert!(store
        .put("favorites/a.webp", Bytes::from_static(b"x"), "image/webp")
        .await
        .is_ok());
}

#[test]
fn test_supabase_public_url_shape() {
    let client =
        SupabaseStorageClient::new("https://proj.supabase.co/", "anon-key", "images").unwrap();
    assert_eq!(
        client.public_url("favorites/img_1.webp"),
        "https://proj.supabase.co/storage/v1/object/public/images/favorites/img_1.webp"
    );
}
