//! HTTP route table.

pub mod bookings;
pub mod health;

use axum::routing::{get, patch};
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route(
            "/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/bookings/count", get(bookings::count_bookings))
        .route(
            "/bookings/count/status/:status",
            get(bookings::count_by_status),
        )
        .route("/bookings/customer/:id", get(bookings::list_by_customer))
        .route("/bookings/vehicle/:id", get(bookings::list_by_vehicle))
        .route("/bookings/status/:status", get(bookings::list_by_status))
        .route(
            "/bookings/:id",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .route("/bookings/:id/confirm", patch(bookings::confirm_booking))
        .route("/bookings/:id/cancel", patch(bookings::cancel_booking))
        .route("/bookings/:id/complete", patch(bookings::complete_booking))
}
