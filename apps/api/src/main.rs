//! # Ceva Rental API
//!
//! HTTP server for vehicle rental bookings.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env (optional) ──► ApiConfig::load ──► tracing ──► Database::new      │
//! │                                                         │               │
//! │                                                         ▼               │
//! │                         axum::serve ◄── ceva_api::app(AppState)         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  Ctrl+C / SIGTERM ──► graceful shutdown ──► pool close  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ceva_api::{AppState, ApiConfig};
use ceva_db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = ApiConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .init();

    info!("Starting Ceva Rental API...");
    info!(
        environment = %config.environment,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    let addr = config.bind_addr()?;
    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let app = ceva_api::app(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
