//! # Booking Repository
//!
//! Database operations for bookings.
//!
//! ## Status Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update()            UPDATE bookings SET ... WHERE id = ?              │
//! │                      (merge-patch edits, status written as given)      │
//! │                                                                         │
//! │  update_if_status()  UPDATE bookings SET ... WHERE id = ?              │
//! │                                               AND status = ?expected   │
//! │                      (state machine transitions)                        │
//! │                                                                         │
//! │  Two callers confirm and cancel the same Pending booking:              │
//! │    A: UPDATE ... WHERE status='pending'  → 1 row  ✓ wins               │
//! │    B: UPDATE ... WHERE status='pending'  → 0 rows ✗ Conflict           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use ceva_core::error::StoreResult;
use ceva_core::ports::BookingStore;
use ceva_core::{Booking, BookingStatus, NewBooking};

const SELECT_BOOKING: &str = r#"
    SELECT
        id,
        customer_id,
        vehicle_id,
        pickup_location_id,
        return_location_id,
        pickup_at,
        return_at,
        total_charge_cents,
        status,
        created_at,
        updated_at
    FROM bookings
"#;

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let sql = format!("{SELECT_BOOKING} WHERE id = ?1");

        let booking = sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Every booking, newest pickup first.
    pub async fn list_all(&self) -> DbResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKING} ORDER BY pickup_at DESC");

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    pub async fn list_by_customer(&self, customer_id: &str) -> DbResult<Vec<Booking>> {
        self.list_where("customer_id = ?1", customer_id).await
    }

    pub async fn list_by_vehicle(&self, vehicle_id: &str) -> DbResult<Vec<Booking>> {
        self.list_where("vehicle_id = ?1", vehicle_id).await
    }

    pub async fn list_by_status(&self, status: BookingStatus) -> DbResult<Vec<Booking>> {
        self.list_where("status = ?1", status.as_str()).await
    }

    async fn list_where(&self, predicate: &str, value: &str) -> DbResult<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKING} WHERE {predicate} ORDER BY pickup_at DESC");

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        debug!(predicate, count = bookings.len(), "Listed bookings");
        Ok(bookings)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(&self, status: BookingStatus) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = ?1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new booking in `Pending` status and returns it.
    pub async fn insert(&self, new: NewBooking) -> DbResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: generate_id(),
            customer_id: new.customer_id,
            vehicle_id: new.vehicle_id,
            pickup_location_id: new.pickup_location_id,
            return_location_id: new.return_location_id,
            pickup_at: new.pickup_at,
            return_at: new.return_at,
            total_charge_cents: new.total_charge_cents,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %booking.id, customer_id = %booking.customer_id, "Inserting booking");

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, customer_id, vehicle_id,
                pickup_location_id, return_location_id,
                pickup_at, return_at,
                total_charge_cents, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.customer_id)
        .bind(&booking.vehicle_id)
        .bind(&booking.pickup_location_id)
        .bind(&booking.return_location_id)
        .bind(booking.pickup_at)
        .bind(booking.return_at)
        .bind(booking.total_charge_cents)
        .bind(booking.status)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Overwrites the mutable columns. Returns `false` if the id is unknown.
    ///
    /// `total_charge_cents`, the references to customer and vehicle, and
    /// `created_at` are never written here.
    pub async fn update(&self, booking: &Booking) -> DbResult<bool> {
        self.write(booking, None).await
    }

    /// Same as [`update`](Self::update), but only if the stored status is
    /// still `expected`.
    pub async fn update_if_status(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> DbResult<bool> {
        self.write(booking, Some(expected)).await
    }

    async fn write(&self, booking: &Booking, expected: Option<BookingStatus>) -> DbResult<bool> {
        debug!(id = %booking.id, status = %booking.status, ?expected, "Updating booking");

        // ?8 IS NULL disables the status guard
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                pickup_at = ?2,
                return_at = ?3,
                pickup_location_id = ?4,
                return_location_id = ?5,
                status = ?6,
                updated_at = ?7
            WHERE id = ?1
              AND (?8 IS NULL OR status = ?8)
            "#,
        )
        .bind(&booking.id)
        .bind(booking.pickup_at)
        .bind(booking.return_at)
        .bind(&booking.pickup_location_id)
        .bind(&booking.return_location_id)
        .bind(booking.status)
        .bind(booking.updated_at)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard-deletes a booking.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting booking");

        let result = sqlx::query("DELETE FROM bookings WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id));
        }

        Ok(())
    }
}

// =============================================================================
// Port Implementation
// =============================================================================

#[async_trait]
impl BookingStore for BookingRepository {
    async fn get(&self, id: &str) -> StoreResult<Option<Booking>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        Ok(self.insert(booking).await?)
    }

    async fn save(&self, booking: &Booking) -> StoreResult<bool> {
        Ok(self.update(booking).await?)
    }

    async fn save_if_status(
        &self,
        booking: &Booking,
        expected: BookingStatus,
    ) -> StoreResult<bool> {
        Ok(self.update_if_status(booking, expected).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
