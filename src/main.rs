mod config;
mod dictionary;
mod game;
mod models;
mod routes;
mod store;
mod utils;
mod websocket;

use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use config::Config;
use dashmap::DashMap;
use dictionary::Dictionary;
use store::{FileStore, KeyValueStore, MemoryStore};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// A connected player's game session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub connected_at: Instant,
}

/// Application state shared across all handlers
pub struct AppState {
    pub dictionary: Arc<Dictionary>,
    /// Local progression store shared by every session
    pub store: Arc<dyn KeyValueStore>,
    /// Active sessions keyed by session id
    pub sessions: DashMap<Uuid, SessionInfo>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordgrid_blitz=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting WordGrid Blitz server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Words cannot be validated without a dictionary, so a load failure is fatal
    let dictionary = Dictionary::shared(&config.game.dictionary_path)
        .await
        .with_context(|| {
            format!(
                "Dictionary is required; download a word list to {}",
                config.game.dictionary_path
            )
        })?;

    let store: Arc<dyn KeyValueStore> = if config.game.progress_path.is_empty() {
        tracing::warn!("PROGRESS_PATH is empty; progress will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        let store = FileStore::open(&config.game.progress_path).with_context(|| {
            format!("Failed to open progress store {}", config.game.progress_path)
        })?;
        tracing::info!("Progress store at {}", store.path().display());
        Arc::new(store)
    };

    // Create application state
    let state = Arc::new(AppState {
        dictionary,
        store,
        sessions: DashMap::new(),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&config.server.frontend_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
