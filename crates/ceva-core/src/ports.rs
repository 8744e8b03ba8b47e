//! # Collaborator Ports
//!
//! Traits the [`BookingService`](crate::service::BookingService) calls into.
//! `ceva-db` implements them over SQLite; tests implement them in memory.
//!
//! ```text
//!   BookingService ──► CustomerDirectory   exists
//!                  ──► VehicleDirectory    exists, daily_rate
//!                  ──► LocationDirectory   exists
//!                  ──► BookingStore        get, create, save, save_if_status
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::money::Money;
use crate::types::{Booking, BookingStatus, NewBooking};

#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn exists(&self, customer_id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait VehicleDirectory: Send + Sync {
    async fn exists(&self, vehicle_id: &str) -> StoreResult<bool>;

    /// `None` if the vehicle does not exist.
    async fn daily_rate(&self, vehicle_id: &str) -> StoreResult<Option<Money>>;
}

#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn exists(&self, location_id: &str) -> StoreResult<bool>;
}

/// Durable storage for bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Option<Booking>>;

    /// Inserts a booking in `Pending` status. The store assigns the id and
    /// audit timestamps.
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking>;

    /// Overwrites every mutable column. Returns `false` if no row has this id.
    async fn save(&self, booking: &Booking) -> StoreResult<bool>;

    /// Like [`save`](Self::save) but only when the stored status still equals
    /// `expected`. Returns `false` if the row is gone or its status changed.
    async fn save_if_status(&self, booking: &Booking, expected: BookingStatus)
        -> StoreResult<bool>;
}
