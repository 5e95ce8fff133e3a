//! LocalGit Server: folder/file version control over HTTP.
//!
//! Main entry point that loads configuration, selects the persistence
//! backend, and starts the server.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use localgit_core::config::{AppConfig, DatabaseBackend};
use localgit_core::error::AppError;
use localgit_database::{DatabasePool, Stores};

#[tokio::main]
async fn main() {
    let env = std::env::var("LOCALGIT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting LocalGit v{}", env!("CARGO_PKG_VERSION"));

    let pool = match config.database.backend {
        DatabaseBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                localgit_database::migration::run_migrations(pool.pool()).await?;
            }
            Some(pool)
        }
        DatabaseBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            None
        }
    };

    let stores = match &pool {
        Some(pool) => Stores::postgres(pool.pool().clone()),
        None => Stores::memory(),
    };

    let result = localgit_api::run_server(config, stores).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    result
}
