//! HTTP surface: the JSON API plus the static page.

pub mod health;
pub mod heroes;
pub mod lineup;
pub mod tips;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::coach::Coach;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub coach: Arc<Coach>,
}

impl AppState {
    pub fn new(coach: Coach) -> Self {
        Self {
            coach: Arc::new(coach),
        }
    }
}

/// Build the application router; anything not under the API is served from `static_dir`
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/heroes", get(heroes::list_heroes))
        .route("/api/get-tips", post(tips::get_tips))
        .route("/api/lineup/check", post(lineup::check_lineup))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
