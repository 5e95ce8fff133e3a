//! Route definitions for the LocalGit HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to every handler through Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route and the request-scoped
/// middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(folder_routes())
        .merge(file_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Liveness probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Folder CRUD and folder listing
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/files", get(handlers::folder::list_files))
}

/// File CRUD, versions, diff, merge, conflict resolution
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::create_file))
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::update_file)
                .delete(handlers::file::delete_file),
        )
        .route("/files/{id}/versions", get(handlers::file::list_versions))
        .route(
            "/files/{id}/versions/{number}",
            get(handlers::file::get_version),
        )
        .route("/files/{id}/diff", get(handlers::file::diff_versions))
        .route("/files/{id}/merge", post(handlers::file::merge_files))
        .route("/files/{id}/resolve", post(handlers::file::resolve_conflict))
}
