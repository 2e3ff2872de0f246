// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Replicate-style prediction client for image generation

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Provider-imposed maximum outputs per prediction call
pub const MAX_OUTPUTS_PER_CALL: u32 = 4;

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_output_format() -> String {
    "webp".to_string()
}

fn default_output_quality() -> u32 {
    90
}

fn default_num_inference_steps() -> u32 {
    28
}

fn default_guidance_scale() -> f32 {
    3.5
}

fn default_prompt_strength() -> f32 {
    0.8
}

fn default_lora_scale() -> f32 {
    1.0
}

fn default_extra_lora_scale() -> f32 {
    0.8
}

/// Tuning parameters forwarded to the provider with every prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    #[serde(default = "default_output_quality")]
    pub output_quality: u32,
    #[serde(default = "default_num_inference_steps")]
    pub num_inference_steps: u32,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f32,
    #[serde(default = "default_prompt_strength")]
    pub prompt_strength: f32,
    #[serde(default = "default_lora_scale")]
    pub lora_scale: f32,
    #[serde(default = "default_extra_lora_scale")]
    pub extra_lora_scale: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: default_aspect_ratio(),
            output_format: default_output_format(),
            output_quality: default_output_quality(),
            num_inference_steps: default_num_inference_steps(),
            guidance_scale: default_guidance_scale(),
            prompt_strength: default_prompt_strength(),
            lora_scale: default_lora_scale(),
            extra_lora_scale: default_extra_lora_scale(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("unexpected provider response: {0}")]
    BadResponse(String),
}

/// Capability boundary for the external image-generation provider
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Submit one prediction and return the hosted image URLs.
    async fn generate(
        &self,
        prompt: &str,
        num_outputs: u32,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, ProviderError>;

    /// Check whether the provider endpoint is reachable.
    async fn health_check(&self) -> bool;
}

// --- Provider wire types ---

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    status: String,
    #[serde(default)]
    output: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for a Replicate-style predictions API
pub struct ReplicateClient {
    client: Client,
    base_url: String,
    api_token: String,
    model_name: String,
    model_version: String,
}

impl ReplicateClient {
    pub fn new(
        base_url: &str,
        api_token: &str,
        model_name: &str,
        model_version: &str,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(
            "Generation client configured: endpoint={}, model={}:{}",
            base_url, model_name, model_version
        );

        Ok(Self {
            client,
            base_url,
            api_token: api_token.to_string(),
            model_name: model_name.to_string(),
            model_version: model_version.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Model-scoped prediction endpoint for the configured model and version
    pub fn prediction_url(&self) -> String {
        format!(
            "{}/v1/models/{}/versions/{}/predictions",
            self.base_url, self.model_name, self.model_version
        )
    }
}

#[async_trait]
impl GenerationClient for ReplicateClient {
    async fn generate(
        &self,
        prompt: &str,
        num_outputs: u32,
        settings: &GenerationSettings,
    ) -> Result<Vec<String>, ProviderError> {
        // The model and version are addressed in the URL; the body carries
        // only the prediction input.
        let body = serde_json::json!({
            "input": {
                "prompt": prompt,
                "num_outputs": num_outputs,
                "aspect_ratio": settings.aspect_ratio,
                "output_format": settings.output_format,
                "output_quality": settings.output_quality,
                "num_inference_steps": settings.num_inference_steps,
                "guidance_scale": settings.guidance_scale,
                "prompt_strength": settings.prompt_strength,
                "lora_scale": settings.lora_scale,
                "extra_lora_scale": settings.extra_lora_scale,
            }
        });

        let url = self.prediction_url();
        debug!("Prediction POST {} (num_outputs={})", url, num_outputs);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            // Hold the connection open until the prediction completes
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let prediction: PredictionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(e.to_string()))?;

        if prediction.status != "succeeded" {
            return Err(ProviderError::BadResponse(format!(
                "prediction {}: {}",
                prediction.status,
                prediction.error.unwrap_or_else(|| "no error detail".to_string())
            )));
        }

        let urls = prediction
            .output
            .ok_or_else(|| ProviderError::BadResponse("no output in prediction".to_string()))?;

        if urls.is_empty() {
            return Err(ProviderError::BadResponse(
                "prediction succeeded with empty output".to_string(),
            ));
        }

        Ok(urls)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Provider health check failed: {}", e);
                false
            }
        }
    }
}

/// Scripted in-memory client for tests: each queued outcome answers one
/// `generate` call, in order. Calls beyond the script fail.
pub struct MockGenerationClient {
    outcomes: Arc<Mutex<VecDeque<Result<Vec<String>, String>>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn push_success(&self, urls: Vec<String>) {
        self.outcomes.lock().await.push_back(Ok(urls));
    }

    pub async fn push_failure(&self, reason: &str) {
        self.outcomes.lock().await.push_back(Err(reason.to_string()));
    }

    /// Prompt and output count of every `generate` call received so far
    pub async fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(
        &self,
        prompt: &str,
        num_outputs: u32,
        _settings: &GenerationSettings,
    ) -> Result<Vec<String>, ProviderError> {
        self.calls
            .lock()
            .await
            .push((prompt.to_string(), num_outputs));

        match self.outcomes.lock().await.pop_front() {
            Some(Ok(urls)) => Ok(urls),
            Some(Err(reason)) => Err(ProviderError::BadResponse(reason)),
            None => Err(ProviderError::BadResponse(
                "no scripted outcome for call".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
