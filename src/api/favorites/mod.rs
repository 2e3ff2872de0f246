// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Favorite persistence endpoints

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{delete_favorite_handler, list_favorites_handler, save_favorite_handler};
pub use request::SaveFavoriteRequest;
pub use response::{DeleteFavoriteResponse, FavoritesListResponse, SaveFavoriteResponse};
