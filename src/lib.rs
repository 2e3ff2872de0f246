// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod favorites;
pub mod generation;
pub mod storage;
pub mod store;
pub mod version;

// Re-export main types
pub use config::Settings;
pub use favorites::{
    FavoriteError, FavoriteImage, FavoriteRecord, FavoriteRepository, FavoriteService,
    InMemoryFavoriteRepository, NewFavoriteRecord, RepositoryError, SupabaseFavoriteRepository,
};
pub use generation::{
    apply_trigger_word, plan_batches, run_generation, BatchFailure, GeneratedImage,
    GenerationClient, GenerationError, GenerationRunResult, GenerationSettings,
    MockGenerationClient, ProviderError, ReplicateClient, MAX_OUTPUTS_PER_CALL,
};
pub use storage::{MockObjectStore, ObjectStorage, StorageError, SupabaseStorageClient};
pub use store::ImageStore;
