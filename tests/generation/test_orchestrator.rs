// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Orchestrator tests: sequential batching, partial success, failure modes

use thumbforge::generation::{
    run_generation, GenerationError, GenerationSettings, MockGenerationClient,
};

fn urls(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://cdn/{}_{}.webp", prefix, i)).collect()
}

#[tokio::test]
async fn test_full_success_follows_batch_plan() {
    let client = MockGenerationClient::new();
    client.push_success(urls("b1", 4)).await;
    client.push_success(urls("b2", 4)).await;
    client.push_success(urls("b3", 2)).await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat on a roof", 10, "DANI", &settings)
        .await
        .unwrap();

    assert_eq!(result.succeeded_count, 10);
    assert_eq!(result.images.len(), 10);
    assert_eq!(result.requested_total, 10);
    assert!(result.failed_batches.is_empty());

    // One provider call per planned batch, in order, with the enhanced prompt
    let calls = client.calls().await;
    assert_eq!(
        calls,
        vec![
            ("DANI cat on a roof".to_string(), 4),
            ("DANI cat on a roof".to_string(), 4),
            ("DANI cat on a roof".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn test_middle_batch_failure_is_partial_success() {
    let client = MockGenerationClient::new();
    client.push_success(urls("b1", 4)).await;
    client.push_failure("provider timed out").await;
    client.push_success(urls("b3", 2)).await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat on a roof", 10, "DANI", &settings)
        .await
        .unwrap();

    assert_eq!(result.succeeded_count, 6);
    assert_eq!(result.images.len(), 6);
    assert_eq!(result.failed_batches.len(), 1);
    // Batches are numbered from 1, so the failing middle batch of three is 2
    assert_eq!(result.failed_batches[0].batch_index, 2);
    assert!(result.failed_batches[0].reason.contains("provider timed out"));

    // The failed batch never aborted the remaining one
    assert_eq!(client.calls().await.len(), 3);
}

#[tokio::test]
async fn test_all_batches_failing_is_fatal() {
    let client = MockGenerationClient::new();
    client.push_failure("rate limited").await;
    client.push_failure("rate limited").await;
    client.push_failure("rate limited").await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat on a roof", 10, "DANI", &settings).await;

    assert!(matches!(result, Err(GenerationError::NoImagesGenerated)));
    assert_eq!(client.calls().await.len(), 3);
}

#[tokio::test]
async fn test_empty_prompt_rejected_before_any_call() {
    let client = MockGenerationClient::new();

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "   ", 10, "DANI", &settings).await;

    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn test_zero_requested_rejected_before_any_call() {
    let client = MockGenerationClient::new();

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat", 0, "DANI", &settings).await;

    assert!(matches!(result, Err(GenerationError::InvalidArgument(_))));
    assert!(client.calls().await.is_empty());
}

#[tokio::test]
async fn test_image_ids_unique_within_run() {
    let client = MockGenerationClient::new();
    client.push_success(urls("b1", 4)).await;
    client.push_success(urls("b2", 3)).await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat on a roof", 7, "DANI", &settings)
        .await
        .unwrap();

    let mut ids: Vec<&str> = result.images.iter().map(|i| i.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 7);
}

#[tokio::test]
async fn test_images_carry_normalized_prompt_and_flags() {
    let client = MockGenerationClient::new();
    client.push_success(urls("b1", 3)).await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat on a roof", 3, "DANI", &settings)
        .await
        .unwrap();

    assert_eq!(result.prompt, "DANI cat on a roof");
    for image in &result.images {
        assert_eq!(image.prompt, "DANI cat on a roof");
        assert!(!image.is_selected);
    }
}

#[tokio::test]
async fn test_single_batch_when_under_provider_max() {
    let client = MockGenerationClient::new();
    client.push_success(urls("b1", 3)).await;

    let settings = GenerationSettings::default();
    let result = run_generation(&client, "cat", 3, "", &settings).await.unwrap();

    assert_eq!(result.succeeded_count, 3);
    assert_eq!(client.calls().await, vec![("cat".to_string(), 3)]);
}
