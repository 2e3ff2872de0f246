// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! The save-favorite chain: fetch source bytes, upload, write metadata
//!
//! The three steps run in order with no compensation on late failure: a
//! metadata write that fails after a successful upload leaves the stored
//! object orphaned at its deterministic path. The next successful save for
//! the same image overwrites it.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;

use super::repository::{FavoriteRecord, FavoriteRepository, NewFavoriteRecord, RepositoryError};
use crate::storage::{ObjectStorage, StorageError};

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to fetch source image: {0}")]
    SourceFetchFailed(String),
    #[error("failed to upload to storage: {0}")]
    StorageUploadFailed(#[from] StorageError),
    #[error("failed to write metadata record: {0}")]
    MetadataWriteFailed(#[from] RepositoryError),
}

/// A favorite as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteImage {
    pub id: String,
    pub image_id: String,
    pub original_url: String,
    #[serde(rename = "supabaseUrl")]
    pub persisted_url: String,
    pub prompt: String,
    pub saved_at: DateTime<Utc>,
}

impl From<FavoriteRecord> for FavoriteImage {
    fn from(record: FavoriteRecord) -> Self {
        Self {
            id: record.id,
            image_id: record.image_id,
            original_url: record.original_url,
            persisted_url: record.supabase_url,
            prompt: record.prompt,
            saved_at: record.saved_at,
        }
    }
}

/// Fetches image bytes from a provider-hosted URL
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, String>;
}

pub struct HttpSourceFetcher {
    client: Client,
}

impl HttpSourceFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("source returned {}", response.status()));
        }

        response.bytes().await.map_err(|e| e.to_string())
    }
}

/// Test fetcher serving canned bytes per URL; unknown URLs fail
pub struct MockSourceFetcher {
    responses: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MockSourceFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn serve(&self, url: &str, data: Bytes) {
        self.responses.lock().await.insert(url.to_string(), data);
    }
}

impl Default for MockSourceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceFetcher for MockSourceFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, String> {
        self.responses
            .lock()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| format!("no response for {}", url))
    }
}

pub struct FavoriteService {
    fetcher: Arc<dyn SourceFetcher>,
    storage: Arc<dyn ObjectStorage>,
    repository: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(
        fetcher: Arc<dyn SourceFetcher>,
        storage: Arc<dyn ObjectStorage>,
        repository: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            fetcher,
            storage,
            repository,
        }
    }

    /// Deterministic storage path for an image id; retries hit the same
    /// object and overwrite it.
    pub fn storage_path(image_id: &str) -> String {
        format!("favorites/{}.webp", image_id)
    }

    /// Persist one generated image: fetch its bytes, upsert them into
    /// object storage, and insert the metadata record. Each step maps to
    /// its own error variant and aborts the chain.
    pub async fn save_favorite(
        &self,
        image_id: &str,
        original_url: &str,
        prompt: &str,
    ) -> Result<FavoriteImage, FavoriteError> {
        if image_id.is_empty() || original_url.is_empty() || prompt.is_empty() {
            return Err(FavoriteError::InvalidArgument(
                "imageId, originalUrl and prompt are required".to_string(),
            ));
        }
        Url::parse(original_url).map_err(|e| {
            FavoriteError::InvalidArgument(format!("originalUrl is not a valid URL: {}", e))
        })?;

        info!("Saving favorite image: id={}", image_id);

        let data = self
            .fetcher
            .fetch(original_url)
            .await
            .map_err(FavoriteError::SourceFetchFailed)?;

        let path = Self::storage_path(image_id);
        self.storage.put(&path, data, "image/webp").await?;

        let public_url = self.storage.public_url(&path);

        let record = self
            .repository
            .insert(NewFavoriteRecord {
                image_id: image_id.to_string(),
                original_url: original_url.to_string(),
                supabase_url: public_url,
                prompt: prompt.to_string(),
            })
            .await
            .map_err(|e| {
                // Upload already happened; the object stays behind on purpose
                warn!("Metadata write failed after upload for {}: {}", image_id, e);
                FavoriteError::MetadataWriteFailed(e)
            })?;

        info!("Favorite saved: id={}, record={}", image_id, record.id);
        Ok(record.into())
    }

    /// All persisted favorites, newest first
    pub async fn list_favorites(&self) -> Result<Vec<FavoriteImage>, FavoriteError> {
        let records = self.repository.list().await?;
        Ok(records.into_iter().map(FavoriteImage::from).collect())
    }

    /// Remove a favorite's metadata record by record id
    pub async fn remove_favorite(&self, id: &str) -> Result<(), FavoriteError> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
