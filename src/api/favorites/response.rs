// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Favorite endpoint response types

use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteImage;

/// Response for POST /favorites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFavoriteResponse {
    pub success: bool,
    pub data: FavoriteImage,
}

/// Response for GET /favorites, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesListResponse {
    pub favorites: Vec<FavoriteImage>,
}

/// Response for DELETE /favorites/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFavoriteResponse {
    pub success: bool,
}
