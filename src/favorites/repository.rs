// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Metadata records for persisted favorites

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("metadata store returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("unexpected metadata response: {0}")]
    BadResponse(String),
}

/// Row in the `favorite_images` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRecord {
    pub id: String,
    pub image_id: String,
    pub original_url: String,
    pub supabase_url: String,
    pub prompt: String,
    pub saved_at: DateTime<Utc>,
}

/// Insert payload; the store assigns `id` and `saved_at`
#[derive(Debug, Clone, Serialize)]
pub struct NewFavoriteRecord {
    pub image_id: String,
    pub original_url: String,
    pub supabase_url: String,
    pub prompt: String,
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn insert(&self, record: NewFavoriteRecord) -> Result<FavoriteRecord, RepositoryError>;
    /// All records, newest first
    async fn list(&self) -> Result<Vec<FavoriteRecord>, RepositoryError>;
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    // Mock-specific hook (no-op for real backend)
    async fn inject_error(&self, _error: RepositoryError) {}
}

/// In-memory repository for tests, with error injection
pub struct InMemoryFavoriteRepository {
    records: Arc<Mutex<Vec<FavoriteRecord>>>,
    injected_error: Arc<Mutex<Option<RepositoryError>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            injected_error: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn record_count(&self) -> usize {
        self.records.lock().await.len()
    }

    async fn check_injected_error(&self) -> Result<(), RepositoryError> {
        let mut error_opt = self.injected_error.lock().await;
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }
}

impl Default for InMemoryFavoriteRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn insert(&self, record: NewFavoriteRecord) -> Result<FavoriteRecord, RepositoryError> {
        self.check_injected_error().await?;

        let stored = FavoriteRecord {
            id: Uuid::new_v4().to_string(),
            image_id: record.image_id,
            original_url: record.original_url,
            supabase_url: record.supabase_url,
            prompt: record.prompt,
            saved_at: Utc::now(),
        };
        self.records.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, RepositoryError> {
        self.check_injected_error().await?;

        let mut records = self.records.lock().await.clone();
        records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.check_injected_error().await?;

        self.records.lock().await.retain(|r| r.id != id);
        Ok(())
    }

    async fn inject_error(&self, error: RepositoryError) {
        let mut injected_error = self.injected_error.lock().await;
        *injected_error = Some(error);
    }
}

/// PostgREST-backed repository over the `favorite_images` table
pub struct SupabaseFavoriteRepository {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseFavoriteRepository {
    const TABLE: &'static str = "favorite_images";

    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, Self::TABLE)
    }
}

#[async_trait]
impl FavoriteRepository for SupabaseFavoriteRepository {
    async fn insert(&self, record: NewFavoriteRecord) -> Result<FavoriteRecord, RepositoryError> {
        let url = self.table_url();
        debug!("Metadata insert POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Server { status, body });
        }

        let mut rows: Vec<FavoriteRecord> = response
            .json()
            .await
            .map_err(|e| RepositoryError::BadResponse(e.to_string()))?;

        rows.pop()
            .ok_or_else(|| RepositoryError::BadResponse("insert returned no row".to_string()))
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, RepositoryError> {
        let url = format!("{}?select=*&order=saved_at.desc", self.table_url());

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Server { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| RepositoryError::BadResponse(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let url = format!("{}?id=eq.{}", self.table_url(), id);

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(RepositoryError::Server { status, body })
        }
    }
}
