//! Request and response bodies.
//!
//! Bookings go out with both the stored integer cents and a decimal
//! `total_charge` for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ceva_core::{Booking, BookingStatus, RequestBooking};

/// Booking as returned by every booking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: String,
    pub customer_id: String,
    pub vehicle_id: String,
    pub pickup_location_id: String,
    pub return_location_id: String,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
    pub total_charge_cents: i64,
    pub total_charge: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        let total_charge = booking.total_charge().as_decimal();
        BookingResponse {
            id: booking.id,
            customer_id: booking.customer_id,
            vehicle_id: booking.vehicle_id,
            pickup_location_id: booking.pickup_location_id,
            return_location_id: booking.return_location_id,
            pickup_at: booking.pickup_at,
            return_at: booking.return_at,
            total_charge_cents: booking.total_charge_cents,
            total_charge,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Body of `POST /bookings`. Fields are named after the stored columns.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: String,
    pub vehicle_id: String,
    pub pickup_location_id: String,
    pub return_location_id: String,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
}

impl From<CreateBookingRequest> for RequestBooking {
    fn from(req: CreateBookingRequest) -> Self {
        RequestBooking {
            customer_id: req.customer_id,
            vehicle_id: req.vehicle_id,
            pickup_location_id: req.pickup_location_id,
            return_location_id: req.return_location_id,
            pickup_at: req.pickup_at,
            return_at: req.return_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub environment: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_response_carries_decimal_total() {
        let now = Utc::now();
        let booking = Booking {
            id: "b-1".into(),
            customer_id: "c-1".into(),
            vehicle_id: "v-1".into(),
            pickup_location_id: "l-1".into(),
            return_location_id: "l-1".into(),
            pickup_at: now,
            return_at: now + chrono::Duration::days(3),
            total_charge_cents: 45_050,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(BookingResponse::from(booking)).unwrap();
        assert_eq!(json["total_charge_cents"], 45_050);
        assert_eq!(json["total_charge"], 450.5);
        assert_eq!(json["status"], "Pending");
    }
}
