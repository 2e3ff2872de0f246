use axum::{
    extract::State,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use super::favorites::{
    delete_favorite_handler, list_favorites_handler, save_favorite_handler,
};
use super::generate::generate_handler;
use crate::favorites::FavoriteService;
use crate::generation::{GenerationClient, GenerationSettings};
use crate::store::ImageStore;
use crate::version;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ImageStore>>,
    pub generator: Arc<dyn GenerationClient>,
    pub favorites: Arc<FavoriteService>,
    pub trigger_word: String,
    pub generation_settings: GenerationSettings,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn GenerationClient>,
        favorites: Arc<FavoriteService>,
        trigger_word: String,
        generation_settings: GenerationSettings,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(ImageStore::new())),
            generator,
            favorites,
            trigger_word,
            generation_settings,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Generation endpoint
        .route("/generate", post(generate_handler))
        // Favorites endpoints
        .route(
            "/favorites",
            post(save_favorite_handler).get(list_favorites_handler),
        )
        .route("/favorites/:id", delete(delete_favorite_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(
    state: AppState,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let provider_reachable = state.generator.health_check().await;

    axum::Json(serde_json::json!({
        "status": "ok",
        "version": version::get_version_info(),
        "provider_reachable": provider_reachable,
    }))
}
