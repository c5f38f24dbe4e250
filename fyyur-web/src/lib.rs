//! fyyur-web library - venue, artist and show listings over HTTP

use axum::Router;
use fyyur_common::config::ListingConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod extract;
pub mod forms;
pub mod listing;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Listing behavior switches
    pub listing: ListingConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, listing: ListingConfig) -> Self {
        Self { db, listing }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::home))
        .merge(api::health_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
