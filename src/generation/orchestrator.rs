// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Sequential batch orchestration with per-batch failure tolerance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::batch::plan_batches;
use super::client::{GenerationClient, GenerationSettings, MAX_OUTPUTS_PER_CALL};
use super::prompt::apply_trigger_word;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("all batches failed, no images were generated")]
    NoImagesGenerated,
}

/// One image minted from a successful batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_selected: bool,
}

/// A provider call that failed; recorded, never fatal to the run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// 1-based position of the batch within the run's plan
    pub batch_index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRunResult {
    pub images: Vec<GeneratedImage>,
    pub requested_total: u32,
    pub succeeded_count: u32,
    pub failed_batches: Vec<BatchFailure>,
    /// Prompt after trigger-word normalization
    pub prompt: String,
}

/// Run a full generation: normalize the prompt, plan batches, and call the
/// provider once per batch, strictly in sequence.
///
/// Individual batch failures are absorbed into `failed_batches` and the run
/// continues; the result is a success as long as at least one image was
/// produced, even when `succeeded_count < requested_total`. Only a run that
/// yields zero images fails, with `NoImagesGenerated`.
pub async fn run_generation(
    client: &dyn GenerationClient,
    prompt: &str,
    requested_total: u32,
    trigger_word: &str,
    settings: &GenerationSettings,
) -> Result<GenerationRunResult, GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::InvalidArgument(
            "prompt must not be empty".to_string(),
        ));
    }

    let enhanced_prompt = apply_trigger_word(prompt, trigger_word);
    let plan = plan_batches(requested_total, MAX_OUTPUTS_PER_CALL)?;

    info!(
        "Starting generation run: {} images in {} batches",
        requested_total,
        plan.len()
    );

    let run_started = Utc::now();
    let run_millis = run_started.timestamp_millis();
    let mut images: Vec<GeneratedImage> = Vec::new();
    let mut failed_batches: Vec<BatchFailure> = Vec::new();

    // Sequential on purpose: the provider rate-limits concurrent predictions.
    // Batches are numbered from 1, in both logs and the failure records.
    for (batch_number, &num_outputs) in (1usize..).zip(plan.iter()) {
        match client.generate(&enhanced_prompt, num_outputs, settings).await {
            Ok(urls) => {
                info!("Batch {}: generated {} images", batch_number, urls.len());
                for url in urls {
                    let index = images.len();
                    images.push(GeneratedImage {
                        id: format!("img_{}_{}", run_millis, index),
                        url,
                        prompt: enhanced_prompt.clone(),
                        created_at: run_started,
                        is_selected: false,
                    });
                }
            }
            Err(e) => {
                warn!("Batch {} failed: {}", batch_number, e);
                failed_batches.push(BatchFailure {
                    batch_index: batch_number,
                    reason: e.to_string(),
                });
            }
        }
    }

    if images.is_empty() {
        return Err(GenerationError::NoImagesGenerated);
    }

    let succeeded_count = images.len() as u32;
    info!(
        "Generation run finished: {}/{} images, {} failed batches",
        succeeded_count,
        requested_total,
        failed_batches.len()
    );

    Ok(GenerationRunResult {
        images,
        requested_total,
        succeeded_count,
        failed_batches,
        prompt: enhanced_prompt,
    })
}
