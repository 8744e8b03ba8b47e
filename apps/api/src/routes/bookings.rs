//! # Booking Routes
//!
//! Lifecycle operations go through [`BookingService`]; listings, counts and
//! deletes read the repository directly.
//!
//! [`BookingService`]: ceva_core::BookingService

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use ceva_core::{BookingPatch, BookingStatus};

use crate::dto::{BookingResponse, CountResponse, CreateBookingRequest};
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

fn to_responses(bookings: Vec<ceva_core::Booking>) -> Json<Vec<BookingResponse>> {
    Json(bookings.into_iter().map(BookingResponse::from).collect())
}

// =============================================================================
// Lifecycle
// =============================================================================

pub async fn create_booking(
    State(state): State<AppState>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BookingResponse>)> {
    let Json(req) = body?;
    let booking = state.service.request_booking(req.into()).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    let booking = state.service.get(&id).await?;
    Ok(Json(booking.into()))
}

/// Merge-patch; absent or `null` fields are left as stored.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<BookingPatch>, JsonRejection>,
) -> ApiResult<Json<BookingResponse>> {
    let Json(patch) = body?;
    let booking = state.service.update_fields(&id, patch).await?;
    Ok(Json(booking.into()))
}

pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    Ok(Json(state.service.confirm(&id).await?.into()))
}

pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    Ok(Json(state.service.cancel(&id).await?.into()))
}

pub async fn complete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BookingResponse>> {
    Ok(Json(state.service.complete(&id).await?.into()))
}

// =============================================================================
// Store operations
// =============================================================================

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.bookings().delete(&id).await?;
    info!(booking_id = %id, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bookings(State(state): State<AppState>) -> ApiResult<Json<Vec<BookingResponse>>> {
    Ok(to_responses(state.db.bookings().list_all().await?))
}

pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    Ok(to_responses(
        state.db.bookings().list_by_customer(&customer_id).await?,
    ))
}

pub async fn list_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    Ok(to_responses(
        state.db.bookings().list_by_vehicle(&vehicle_id).await?,
    ))
}

pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<BookingResponse>>> {
    let status: BookingStatus = status.parse()?;
    Ok(to_responses(state.db.bookings().list_by_status(status).await?))
}

pub async fn count_bookings(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.db.bookings().count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn count_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<CountResponse>> {
    let status: BookingStatus = status.parse()?;
    let count = state.db.bookings().count_by_status(status).await?;
    Ok(Json(CountResponse { count }))
}
