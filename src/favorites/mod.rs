// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Favorite persistence: object upload plus a metadata record

pub mod repository;
pub mod service;

pub use repository::{
    FavoriteRecord, FavoriteRepository, InMemoryFavoriteRepository, NewFavoriteRecord,
    RepositoryError, SupabaseFavoriteRepository,
};
pub use service::{
    FavoriteError, FavoriteImage, FavoriteService, HttpSourceFetcher, MockSourceFetcher,
    SourceFetcher,
};
