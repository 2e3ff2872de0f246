// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Generation endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, warn};

use super::request::GenerateRequest;
use super::response::GenerateResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::generation::run_generation;

/// POST /generate - Generate a batch of images from a text prompt
///
/// Pipeline:
/// 1. Validate request
/// 2. Reject if a run is already in flight (the store does not self-enforce
///    this, the call site does)
/// 3. Mark the store generating and clear the previous run
/// 4. Run the batched generation
/// 5. Publish the new image list to the store and respond
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    debug!(
        "Generation request received: prompt_len={}, num_images={}",
        request.prompt.len(),
        request.num_images
    );

    if let Err(e) = request.validate() {
        warn!("Generation validation failed: {}", e);
        return Err(ApiError::InvalidRequest(e));
    }

    // Cross-run mutual exclusion: check and flip under one lock
    {
        let mut store = state.store.lock().await;
        if store.is_generating() {
            warn!("Rejecting generation request: run already in flight");
            return Err(ApiError::RunInFlight);
        }
        store.set_generating(true);
        store.set_prompt(&request.prompt);
        store.clear_generated();
    }

    let result = run_generation(
        state.generator.as_ref(),
        &request.prompt,
        request.num_images,
        &state.trigger_word,
        &state.generation_settings,
    )
    .await;

    let mut store = state.store.lock().await;
    store.set_generating(false);

    match result {
        Ok(run) => {
            store.set_generated_images(run.images.clone());
            store.set_progress(1.0);
            Ok(Json(run.into()))
        }
        Err(e) => {
            warn!("Generation run failed: {}", e);
            store.set_error(Some(e.to_string()));
            Err(e.into())
        }
    }
}
