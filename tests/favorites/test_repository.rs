// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Metadata repository tests

use std::time::Duration;
use thumbforge::favorites::{
    FavoriteRepository, InMemoryFavoriteRepository, NewFavoriteRecord, RepositoryError,
};

fn record(image_id: &str) -> NewFavoriteRecord {
    NewFavoriteRecord {
        image_id: image_id.to_string(),
        original_url: format!("https://cdn/{}.webp", image_id),
        supabase_url: format!("https://storage/favorites/{}.webp", image_id),
        prompt: "DANI cat".to_string(),
    }
}

#[tokio::test]
async fn test_insert_assigns_id_and_timestamp() {
    let repo = InMemoryFavoriteRepository::new();

    let stored = repo.insert(record("img_1")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert_eq!(stored.image_id, "img_1");
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let repo = InMemoryFavoriteRepository::new();

    repo.insert(record("img_old")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    repo.insert(record("img_new")).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].image_id, "img_new");
    assert_eq!(listed[1].image_id, "img_old");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let repo = InMemoryFavoriteRepository::new();

    let stored = repo.insert(record("img_1")).await.unwrap();
    repo.delete(&stored.id).await.unwrap();
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_injected_error_surfaces_once() {
    let repo = InMemoryFavoriteRepository::new();
    repo.inject_error(RepositoryError::Network("connection refused".to_string()))
        .await;

    assert!(repo.list().await.is_err());
    // Injection is one-shot
    assert!(repo.list().await.is_ok());
}
