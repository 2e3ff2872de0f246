// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Generation response types

use serde::{Deserialize, Serialize};

use crate::generation::{BatchFailure, GeneratedImage, GenerationRunResult};

/// Response for POST /generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub images: Vec<GeneratedImage>,
    pub total: u32,
    /// Prompt after trigger-word normalization
    pub prompt: String,
    /// Batches that failed; present so partial results are visible to the
    /// caller
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_batches: Vec<BatchFailure>,
}

impl From<GenerationRunResult> for GenerateResponse {
    fn from(result: GenerationRunResult) -> Self {
        Self {
            total: result.succeeded_count,
            images: result.images,
            prompt: result.prompt,
            failed_batches: result.failed_batches,
        }
    }
}
