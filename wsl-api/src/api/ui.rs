//! UI serving routes
//!
//! The single-page UI is embedded at compile time. Any unmatched GET returns
//! the entry page so client-side paths keep working on reload. When a static
//! directory is configured its files are served instead, with its
//! `index.html` as the catch-all.

use axum::{
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../../ui/index.html");
const APP_JS: &str = include_str!("../../ui/app.js");
const STYLES_CSS: &str = include_str!("../../ui/styles.css");

/// GET /
///
/// Serves the main UI page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        APP_JS,
    )
        .into_response()
}

/// GET /static/styles.css
pub async fn serve_styles_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        STYLES_CSS,
    )
        .into_response()
}

/// Catch-all for unmatched routes: the entry page for GET/HEAD, 404 otherwise
pub async fn spa_fallback(method: Method) -> Response {
    if method == Method::GET || method == Method::HEAD {
        Html(INDEX_HTML).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Build embedded UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/app.js", get(serve_app_js))
        .route("/static/styles.css", get(serve_styles_css))
}

/// Serve a built UI from disk, falling back to its `index.html`
pub fn static_dir_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
