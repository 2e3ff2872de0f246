// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod favorites;
pub mod generate;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use favorites::{
    delete_favorite_handler, list_favorites_handler, save_favorite_handler, FavoritesListResponse,
    SaveFavoriteRequest, SaveFavoriteResponse,
};
pub use generate::{generate_handler, GenerateRequest, GenerateResponse};
pub use http_server::{build_router, start_server, AppState};
