//! wsl-api library - Worship song list REST service
//!
//! Serves per-leader song CRUD over HTTP plus the single-page web UI.

use axum::Router;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

pub use crate::db::SongStores;
pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// One song store per worship leader
    pub stores: SongStores,
    /// Built UI directory to serve instead of the embedded UI
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Create new application state serving the embedded UI
    pub fn new(stores: SongStores) -> Self {
        Self {
            stores,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}

/// Build application router
///
/// Song and status routes are matched first; everything else falls through
/// to the UI entry page.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes());

    let router = match state.static_dir.as_deref() {
        Some(dir) => router.fallback_service(api::static_dir_service(dir)),
        None => router.merge(api::ui_routes()).fallback(api::spa_fallback),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
