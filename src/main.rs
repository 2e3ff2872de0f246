// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use std::env;
use std::sync::Arc;
use thumbforge::{
    api::{start_server, AppState},
    config::Settings,
    favorites::{FavoriteService, HttpSourceFetcher, SupabaseFavoriteRepository},
    generation::ReplicateClient,
    storage::SupabaseStorageClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("Starting {}", thumbforge::version::get_version_string());

    let settings = Settings::from_env()?;

    let generator = ReplicateClient::new(
        &settings.provider.base_url,
        &settings.provider.api_token,
        &settings.provider.model_name,
        &settings.provider.model_version,
    )?;

    let storage = SupabaseStorageClient::new(
        &settings.storage.supabase_url,
        &settings.storage.supabase_key,
        &settings.storage.bucket,
    )?;

    let repository = SupabaseFavoriteRepository::new(
        &settings.storage.supabase_url,
        &settings.storage.supabase_key,
    )?;

    let favorites = FavoriteService::new(
        Arc::new(HttpSourceFetcher::new()?),
        Arc::new(storage),
        Arc::new(repository),
    );

    let state = AppState::new(
        Arc::new(generator),
        Arc::new(favorites),
        settings.provider.trigger_word.clone(),
        settings.generation.clone(),
    );

    start_server(state, settings.api_port)
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
