//! Shared application state handed to every handler.

use std::sync::Arc;

use ceva_core::BookingService;
use ceva_db::Database;

use crate::config::ApiConfig;

/// Cloned into each request by axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle operations (request, confirm, cancel, complete, update)
    pub service: BookingService,

    /// Direct store access for listings, counts, deletes and health checks
    pub db: Database,

    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// Wires a [`BookingService`] to the SQLite repositories of `db`.
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let service = BookingService::new(
            Arc::new(db.users()),
            Arc::new(db.vehicles()),
            Arc::new(db.locations()),
            Arc::new(db.bookings()),
        );

        AppState {
            service,
            db,
            config: Arc::new(config),
        }
    }
}
