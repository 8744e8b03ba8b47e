//! Service banner and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::dto::{BannerResponse, HealthResponse};
use crate::state::AppState;

pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        status: "online".to_string(),
        message: "Welcome to Ceva Automotives API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 200 when the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = state.db.health_check().await;

    let (code, status, message, database) = if db_ok {
        (StatusCode::OK, "healthy", "API is running", "connected")
    } else {
        tracing::warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "unhealthy",
            "Database unavailable",
            "disconnected",
        )
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            message: message.to_string(),
            environment: state.config.environment.clone(),
            database: database.to_string(),
        }),
    )
}
