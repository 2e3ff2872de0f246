// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Favorite save request types and validation

use serde::{Deserialize, Serialize};

/// Request for POST /favorites
///
/// Fields are optional at the wire level so a missing field maps to a 400
/// with a useful message instead of a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFavoriteRequest {
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl SaveFavoriteRequest {
    /// Validate presence of all fields and return them
    pub fn validate(&self) -> Result<(&str, &str, &str), String> {
        match (
            self.image_id.as_deref().filter(|s| !s.is_empty()),
            self.original_url.as_deref().filter(|s| !s.is_empty()),
            self.prompt.as_deref().filter(|s| !s.is_empty()),
        ) {
            (Some(image_id), Some(original_url), Some(prompt)) => {
                Ok((image_id, original_url, prompt))
            }
            _ => Err("Missing required fields: imageId, originalUrl, prompt".to_string()),
        }
    }
}
