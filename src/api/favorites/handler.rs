// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Favorite endpoint handlers

use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, warn};

use super::request::SaveFavoriteRequest;
use super::response::{DeleteFavoriteResponse, FavoritesListResponse, SaveFavoriteResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /favorites - Persist one generated image and record its metadata
pub async fn save_favorite_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveFavoriteRequest>,
) -> Result<Json<SaveFavoriteResponse>, ApiError> {
    let (image_id, original_url, prompt) = request
        .validate()
        .map_err(ApiError::InvalidRequest)?;

    debug!("Save favorite request: image_id={}", image_id);

    let favorite = state
        .favorites
        .save_favorite(image_id, original_url, prompt)
        .await?;

    // Mirror the persisted favorite into the session store
    state.store.lock().await.add_favorite(favorite.clone());

    Ok(Json(SaveFavoriteResponse {
        success: true,
        data: favorite,
    }))
}

/// GET /favorites - All persisted favorites, newest first
pub async fn list_favorites_handler(
    State(state): State<AppState>,
) -> Result<Json<FavoritesListResponse>, ApiError> {
    let favorites = state.favorites.list_favorites().await.map_err(|e| {
        warn!("Failed to fetch favorites: {}", e);
        ApiError::FavoritesFetchFailed {
            details: e.to_string(),
        }
    })?;

    Ok(Json(FavoritesListResponse { favorites }))
}

/// DELETE /favorites/{id} - Remove a favorite's metadata record
pub async fn delete_favorite_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteFavoriteResponse>, ApiError> {
    state.favorites.remove_favorite(&id).await.map_err(|e| {
        warn!("Failed to delete favorite {}: {}", id, e);
        ApiError::FavoriteDeleteFailed {
            details: e.to_string(),
        }
    })?;

    state.store.lock().await.remove_favorite(&id);

    Ok(Json(DeleteFavoriteResponse { success: true }))
}
