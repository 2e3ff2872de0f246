// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Object storage capability: put bytes under a path, resolve a public URL
//!
//! Uploads are upserts: writing the same path twice overwrites the object,
//! which keeps favorite saves idempotent under retry.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error: {0}")]
    Server(String),
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upsert `data` at `path`. A second put at the same path overwrites.
    async fn put(&self, path: &str, data: Bytes, content_type: &str)
        -> Result<(), StorageError>;
    async fn get(&self, path: &str) -> Result<Bytes, StorageError>;
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
    /// Public URL that serves the object at `path`
    fn public_url(&self, path: &str) -> String;

    // Mock-specific hook (no-op for real backend)
    async fn inject_error(&self, _error: StorageError) {}
}

fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath("empty path".to_string()));
    }
    if path.starts_with('/') {
        return Err(StorageError::InvalidPath(
            "path cannot start with /".to_string(),
        ));
    }
    if path.contains("../") {
        return Err(StorageError::InvalidPath(
            "path traversal not allowed".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug)]
struct MockObject {
    data: Bytes,
    content_type: String,
    digest: String,
}

/// In-memory object store for tests, with error injection
#[derive(Debug)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, MockObject>>>,
    injected_error: Arc<Mutex<Option<StorageError>>>,
    base_url: String,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            injected_error: Arc::new(Mutex::new(None)),
            base_url: "mock://storage".to_string(),
        }
    }

    fn digest(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Number of stored objects, for idempotence assertions
    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }

    /// Content digest of the object at `path`, if present
    pub async fn digest_at(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .await
            .get(path)
            .map(|obj| obj.digest.clone())
    }

    pub async fn content_type_at(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .await
            .get(path)
            .map(|obj| obj.content_type.clone())
    }

    async fn check_injected_error(&self) -> Result<(), StorageError> {
        let mut error_opt = self.injected_error.lock().await;
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStore {
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.check_injected_error().await?;
        validate_path(path)?;

        let object = MockObject {
            digest: Self::digest(&data),
            content_type: content_type.to_string(),
            data,
        };
        self.objects.lock().await.insert(path.to_string(), object);
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Bytes, StorageError> {
        self.check_injected_error().await?;
        validate_path(path)?;

        self.objects
            .lock()
            .await
            .get(path)
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        self.check_injected_error().await?;
        validate_path(path)?;

        Ok(self.objects.lock().await.contains_key(path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.check_injected_error().await?;
        validate_path(path)?;

        self.objects
            .lock()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn inject_error(&self, error: StorageError) {
        let mut injected_error = self.injected_error.lock().await;
        *injected_error = Some(error);
    }
}

/// Supabase Storage backend over its REST surface
pub struct SupabaseStorageClient {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseStorageClient {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            bucket: bucket.to_string(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorageClient {
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_path(path)?;

        let url = self.object_url(path);
        debug!("Storage upload POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(StorageError::Server(format!(
                "upload failed with {}: {}",
                status, body
            )))
        }
    }

    async fn get(&self, path: &str) -> Result<Bytes, StorageError> {
        validate_path(path)?;

        let response = self
            .client
            .get(self.object_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if response.status().is_success() {
            response
                .bytes()
                .await
                .map_err(|e| StorageError::Network(e.to_string()))
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Err(StorageError::NotFound(path.to_string()))
        } else {
            Err(StorageError::Server(format!(
                "download failed with {}",
                response.status()
            )))
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        validate_path(path)?;

        let response = self
            .client
            .head(self.object_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        validate_path(path)?;

        let response = self
            .client
            .delete(self.object_url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Err(StorageError::NotFound(path.to_string()))
        } else {
            Err(StorageError::Server(format!(
                "delete failed with {}",
                response.status()
            )))
        }
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }
}
