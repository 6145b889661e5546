//! HTTP route handlers.

pub mod export;
pub mod files;
pub mod process;
pub mod search;
pub mod stats;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Leave headroom over the per-file cap for multipart framing
    let body_limit = state.config.max_upload_bytes * 2;

    Router::new()
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(files::routes())
        .merge(process::routes())
        .merge(export::routes())
        .merge(search::routes())
        .merge(stats::routes())
}
