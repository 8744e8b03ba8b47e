//! # ceva-api: HTTP Server for Ceva Rental
//!
//! axum boundary over the booking lifecycle.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  TraceLayer ──► CorsLayer ──► routes::router()                          │
//! │                                   │                                     │
//! │                    ┌──────────────┴──────────────┐                      │
//! │                    ▼                             ▼                      │
//! │             BookingService               Database repositories          │
//! │           (create, transitions,         (list, count, delete,           │
//! │            update, get)                  health)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
