// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Generation request types and validation

use serde::{Deserialize, Serialize};

/// Cap on a single request; keeps one caller from queueing hundreds of
/// provider calls
pub const MAX_IMAGES_PER_REQUEST: u32 = 40;

fn default_num_images() -> u32 {
    10
}

/// Request for batched generation via POST /generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Text prompt describing the desired image
    pub prompt: String,

    /// How many images to generate across all batches
    #[serde(default = "default_num_images")]
    pub num_images: u32,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("Prompt is required".to_string());
        }

        if self.num_images == 0 {
            return Err("numImages must be greater than zero".to_string());
        }

        if self.num_images > MAX_IMAGES_PER_REQUEST {
            return Err(format!(
                "numImages must be at most {}, got {}",
                MAX_IMAGES_PER_REQUEST, self.num_images
            ));
        }

        Ok(())
    }
}
