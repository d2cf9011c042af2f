//! Music Catalog Library
//!
//! Artists, albums and songs edited through one generic, permission-checked
//! add/change/delete/clone path. Modules are exposed for integration testing.

pub mod auth;
pub mod config;
pub mod crud;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod revision;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // API routes (JSON)
        .nest("/api", handlers::api_routes())

        // Generic object views (Maud + HTMX)
        .merge(handlers::object_routes())
        .merge(handlers::html_routes())

        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
