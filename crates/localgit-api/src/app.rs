//! Application builder: wires router, middleware, and state into an Axum
//! app, and runs it.

use tower_http::trace::TraceLayer;
use tracing::{error, info};

use localgit_core::config::AppConfig;
use localgit_core::error::{AppError, ErrorKind};
use localgit_core::result::AppResult;
use localgit_database::Stores;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> axum::Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serves LocalGit on the configured address until Ctrl+C.
pub async fn run_server(config: AppConfig, stores: Stores) -> AppResult<()> {
    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, stores));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
        })?;

    info!(address = %addr, "LocalGit server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("LocalGit server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
