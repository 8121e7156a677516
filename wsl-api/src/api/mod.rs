//! HTTP API handlers for wsl-api

pub mod health;
pub mod songs;
pub mod ui;

pub use health::{health_routes, BUILD_INFO};
pub use songs::song_routes;
pub use ui::{spa_fallback, static_dir_service, ui_routes};
