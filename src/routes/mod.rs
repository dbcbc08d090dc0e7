pub mod health;
pub mod progress;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/progress", get(progress::get_progress))
        .route("/themes", get(progress::list_themes))
        .route("/theme", axum::routing::post(progress::select_theme))
}
