//! # Booking Service
//!
//! The booking lifecycle manager. Validates requests against the
//! directories, prices them, and drives every status change through the
//! state machine in [`crate::lifecycle`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request_booking(cmd)                                                   │
//! │       │                                                                 │
//! │       ├── customer exists?         no → ReferenceNotFound(customer)     │
//! │       ├── vehicle exists?          no → ReferenceNotFound(vehicle)      │
//! │       ├── pickup location exists?  no → ReferenceNotFound(location)     │
//! │       ├── return location exists?  no → ReferenceNotFound(location)     │
//! │       ├── return_at > pickup_at?   no → InvalidWindow                   │
//! │       ├── daily_rate × billed_days                                      │
//! │       └── store.create  ──► Booking { status: Pending }                 │
//! │                                                                         │
//! │  confirm / cancel / complete(id)                                        │
//! │       │                                                                 │
//! │       ├── store.get             None → NotFound                         │
//! │       ├── Transition::apply     wrong state → InvalidTransition         │
//! │       └── store.save_if_status  status moved underneath us → Conflict   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no booking state. Every call reads, decides, and writes
//! back through the store.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{BookingError, BookingResult, ReferenceKind};
use crate::lifecycle::Transition;
use crate::ports::{BookingStore, CustomerDirectory, LocationDirectory, VehicleDirectory};
use crate::pricing;
use crate::types::{Booking, BookingPatch, NewBooking, RequestBooking};
use crate::validation::validate_rental_window;

/// Booking lifecycle manager.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct BookingService {
    customers: Arc<dyn CustomerDirectory>,
    vehicles: Arc<dyn VehicleDirectory>,
    locations: Arc<dyn LocationDirectory>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingService {
    pub fn new(
        customers: Arc<dyn CustomerDirectory>,
        vehicles: Arc<dyn VehicleDirectory>,
        locations: Arc<dyn LocationDirectory>,
        bookings: Arc<dyn BookingStore>,
    ) -> Self {
        BookingService {
            customers,
            vehicles,
            locations,
            bookings,
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Validates, prices and stores a new booking in `Pending` status.
    ///
    /// References are checked before the window, in the order customer,
    /// vehicle, pickup location, return location. The first failure wins.
    pub async fn request_booking(&self, cmd: RequestBooking) -> BookingResult<Booking> {
        if !self.customers.exists(&cmd.customer_id).await? {
            return Err(BookingError::reference_not_found(
                ReferenceKind::Customer,
                cmd.customer_id,
            ));
        }

        if !self.vehicles.exists(&cmd.vehicle_id).await? {
            return Err(BookingError::reference_not_found(
                ReferenceKind::Vehicle,
                cmd.vehicle_id,
            ));
        }

        for location_id in [&cmd.pickup_location_id, &cmd.return_location_id] {
            if !self.locations.exists(location_id).await? {
                return Err(BookingError::reference_not_found(
                    ReferenceKind::Location,
                    location_id.as_str(),
                ));
            }
        }

        validate_rental_window(cmd.pickup_at, cmd.return_at)?;

        // The vehicle can vanish between the existence check and here.
        let daily_rate = match self.vehicles.daily_rate(&cmd.vehicle_id).await? {
            Some(rate) => rate,
            None => {
                return Err(BookingError::reference_not_found(
                    ReferenceKind::Vehicle,
                    cmd.vehicle_id,
                ))
            }
        };

        let charge = pricing::rental_charge(daily_rate, cmd.pickup_at, cmd.return_at)?;

        let booking = self
            .bookings
            .create(NewBooking {
                customer_id: cmd.customer_id,
                vehicle_id: cmd.vehicle_id,
                pickup_location_id: cmd.pickup_location_id,
                return_location_id: cmd.return_location_id,
                pickup_at: cmd.pickup_at,
                return_at: cmd.return_at,
                total_charge_cents: charge.cents(),
            })
            .await?;

        info!(
            booking_id = %booking.id,
            customer_id = %booking.customer_id,
            vehicle_id = %booking.vehicle_id,
            total_charge = %charge,
            "Booking requested"
        );

        Ok(booking)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get(&self, id: &str) -> BookingResult<Booking> {
        self.bookings
            .get(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// `Pending` → `Confirmed`.
    pub async fn confirm(&self, id: &str) -> BookingResult<Booking> {
        self.transition(id, Transition::Confirm).await
    }

    /// `Pending` | `Confirmed` → `Cancelled`.
    pub async fn cancel(&self, id: &str) -> BookingResult<Booking> {
        self.transition(id, Transition::Cancel).await
    }

    /// `Confirmed` → `Completed`.
    pub async fn complete(&self, id: &str) -> BookingResult<Booking> {
        self.transition(id, Transition::Complete).await
    }

    async fn transition(&self, id: &str, transition: Transition) -> BookingResult<Booking> {
        let mut booking = self.get(id).await?;
        let from = booking.status;

        booking.status = transition.apply(from)?;
        booking.updated_at = Utc::now();

        if !self.bookings.save_if_status(&booking, from).await? {
            // Either deleted or moved to another status since our read.
            if self.bookings.get(id).await?.is_none() {
                return Err(BookingError::NotFound(id.to_string()));
            }
            warn!(booking_id = %id, %transition, "Lost status race");
            return Err(BookingError::Conflict { id: id.to_string() });
        }

        info!(booking_id = %id, %from, to = %booking.status, "Booking status changed");
        Ok(booking)
    }

    // =========================================================================
    // Merge-patch
    // =========================================================================

    /// Applies the fields present in `patch` and refreshes `updated_at`.
    ///
    /// The charge is not recomputed, the window is not re-validated, the
    /// locations are not re-checked, and a patched `status` is written as-is.
    pub async fn update_fields(&self, id: &str, patch: BookingPatch) -> BookingResult<Booking> {
        let mut booking = self.get(id).await?;

        patch.apply_to(&mut booking);
        booking.updated_at = Utc::now();

        if !self.bookings.save(&booking).await? {
            return Err(BookingError::NotFound(id.to_string()));
        }

        debug!(booking_id = %id, ?patch, "Booking fields updated");
        Ok(booking)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::money::Money;
    use crate::types::BookingStatus;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    // -------------------------------------------------------------------------
    // In-memory fakes
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct Ids(HashSet<String>);

    #[async_trait]
    impl CustomerDirectory for Ids {
        async fn exists(&self, id: &str) -> StoreResult<bool> {
            Ok(self.0.contains(id))
        }
    }

    #[async_trait]
    impl LocationDirectory for Ids {
        async fn exists(&self, id: &str) -> StoreResult<bool> {
            Ok(self.0.contains(id))
        }
    }

    /// Vehicles with rates. `vanishing` ones pass `exists` but have no rate.
    #[derive(Default)]
    struct Fleet {
        rates: HashMap<String, Money>,
        vanishing: HashSet<String>,
    }

    #[async_trait]
    impl VehicleDirectory for Fleet {
        async fn exists(&self, id: &str) -> StoreResult<bool> {
            Ok(self.rates.contains_key(id) || self.vanishing.contains(id))
        }

        async fn daily_rate(&self, id: &str) -> StoreResult<Option<Money>> {
            Ok(self.rates.get(id).copied())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<String, Booking>>,
        next_id: Mutex<u32>,
        /// Status another writer slips in right after our next `get`.
        race_to: Mutex<Option<BookingStatus>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        async fn get(&self, id: &str) -> StoreResult<Option<Booking>> {
            let mut rows = self.rows.lock().unwrap();
            let found = rows.get(id).cloned();
            if let Some(status) = self.race_to.lock().unwrap().take() {
                if let Some(row) = rows.get_mut(id) {
                    row.status = status;
                }
            }
            Ok(found)
        }

        async fn create(&self, new: NewBooking) -> StoreResult<Booking> {
            if self.fail_writes {
                return Err(StoreError::new("disk full"));
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let now = Utc::now();
            let booking = Booking {
                id: format!("b-{next}"),
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
            self.rows
                .lock()
                .unwrap()
                .insert(booking.id.clone(), booking.clone());
            Ok(booking)
        }

        async fn save(&self, booking: &Booking) -> StoreResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&booking.id) {
                Some(row) => {
                    *row = booking.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn save_if_status(
            &self,
            booking: &Booking,
            expected: BookingStatus,
        ) -> StoreResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&booking.id) {
                Some(row) if row.status == expected => {
                    *row = booking.clone();
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    struct Harness {
        service: BookingService,
        store: Arc<MemoryStore>,
    }

    fn harness_with(store: MemoryStore) -> Harness {
        let customers = Ids(["c-1".to_string()].into());
        let locations = Ids(["l-1".to_string(), "l-2".to_string()].into());
        let fleet = Fleet {
            rates: [("v-1".to_string(), Money::from_cents(15_000))].into(),
            vanishing: ["v-gone".to_string()].into(),
        };
        let store = Arc::new(store);
        let service = BookingService::new(
            Arc::new(customers),
            Arc::new(fleet),
            Arc::new(locations),
            store.clone(),
        );
        Harness { service, store }
    }

    fn harness() -> Harness {
        harness_with(MemoryStore::default())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap()
    }

    fn request(duration: Duration) -> RequestBooking {
        RequestBooking {
            customer_id: "c-1".to_string(),
            vehicle_id: "v-1".to_string(),
            pickup_location_id: "l-1".to_string(),
            return_location_id: "l-2".to_string(),
            pickup_at: t0(),
            return_at: t0() + duration,
        }
    }

    // -------------------------------------------------------------------------
    // request_booking
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_request_booking_prices_and_starts_pending() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(3))).await.unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_charge(), Money::from_cents(45_000));
        assert_eq!(h.store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_request_booking_billing_clamp() {
        let h = harness();
        for (duration, cents) in [
            (Duration::hours(2), 15_000),
            (Duration::hours(25), 15_000),
            (Duration::hours(72), 45_000),
        ] {
            let booking = h.service.request_booking(request(duration)).await.unwrap();
            assert_eq!(booking.total_charge_cents, cents, "window {duration}");
        }
    }

    #[tokio::test]
    async fn test_request_booking_invalid_window() {
        let h = harness();
        for duration in [Duration::zero(), Duration::hours(-1)] {
            let err = h.service.request_booking(request(duration)).await.unwrap_err();
            assert!(matches!(err, BookingError::InvalidWindow));
        }
        assert!(h.store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reference_checks_run_in_order() {
        let h = harness();

        // bad customer masks bad vehicle, bad locations and bad window
        let mut cmd = request(Duration::hours(-5));
        cmd.customer_id = "nobody".to_string();
        cmd.vehicle_id = "no-car".to_string();
        cmd.pickup_location_id = "nowhere".to_string();
        let err = h.service.request_booking(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::ReferenceNotFound { kind: ReferenceKind::Customer, .. }
        ));

        let mut cmd = request(Duration::hours(-5));
        cmd.vehicle_id = "no-car".to_string();
        let err = h.service.request_booking(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::ReferenceNotFound { kind: ReferenceKind::Vehicle, .. }
        ));

        let mut cmd = request(Duration::days(1));
        cmd.return_location_id = "nowhere".to_string();
        let err = h.service.request_booking(cmd).await.unwrap_err();
        match err {
            BookingError::ReferenceNotFound { kind, id } => {
                assert_eq!(kind, ReferenceKind::Location);
                assert_eq!(id, "nowhere");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_vehicle_vanishing_before_rate_lookup() {
        let h = harness();
        let mut cmd = request(Duration::days(1));
        cmd.vehicle_id = "v-gone".to_string();

        let err = h.service.request_booking(cmd).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::ReferenceNotFound { kind: ReferenceKind::Vehicle, .. }
        ));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let h = harness_with(MemoryStore {
            fail_writes: true,
            ..Default::default()
        });
        let err = h.service.request_booking(request(Duration::days(1))).await.unwrap_err();
        assert!(matches!(err, BookingError::Store(_)));
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_end_to_end_lifecycle() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(3))).await.unwrap();
        assert_eq!(booking.total_charge().as_decimal(), 450.0);

        let confirmed = h.service.confirm(&booking.id).await.unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert!(confirmed.updated_at >= booking.updated_at);

        let completed = h.service.complete(&booking.id).await.unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);

        let err = h.service.cancel(&booking.id).await.unwrap_err();
        assert_eq!(err.to_string(), "completed bookings may not be cancelled");

        let stored = h.service.get(&booking.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Completed);
    }

    #[tokio::test]
    async fn test_confirm_twice_fails() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(1))).await.unwrap();

        h.service.confirm(&booking.id).await.unwrap();
        let err = h.service.confirm(&booking.id).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition("only pending bookings may be confirmed")
        ));
    }

    #[tokio::test]
    async fn test_cancel_from_pending_and_confirmed() {
        let h = harness();

        let pending = h.service.request_booking(request(Duration::days(1))).await.unwrap();
        let cancelled = h.service.cancel(&pending.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let other = h.service.request_booking(request(Duration::days(1))).await.unwrap();
        h.service.confirm(&other.id).await.unwrap();
        let cancelled = h.service.cancel(&other.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        // terminal
        assert!(h.service.cancel(&other.id).await.is_err());
        assert!(h.service.confirm(&other.id).await.is_err());
    }

    #[tokio::test]
    async fn test_complete_requires_confirmed() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(1))).await.unwrap();

        let err = h.service.complete(&booking.id).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition("only confirmed bookings may be completed")
        ));
    }

    #[tokio::test]
    async fn test_transition_unknown_booking() {
        let h = harness();
        for result in [
            h.service.confirm("missing").await,
            h.service.cancel("missing").await,
            h.service.complete("missing").await,
        ] {
            assert!(matches!(result, Err(BookingError::NotFound(id)) if id == "missing"));
        }
    }

    #[tokio::test]
    async fn test_losing_a_race_is_a_conflict() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(1))).await.unwrap();

        // someone cancels between our read and our write
        *h.store.race_to.lock().unwrap() = Some(BookingStatus::Cancelled);

        let err = h.service.confirm(&booking.id).await.unwrap_err();
        assert!(matches!(err, BookingError::Conflict { .. }));

        let stored = h.service.get(&booking.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    // -------------------------------------------------------------------------
    // update_fields
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_fields_is_a_merge_patch() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(3))).await.unwrap();

        let patch = BookingPatch {
            return_at: Some(t0() + Duration::days(10)),
            pickup_location_id: Some("l-2".to_string()),
            ..Default::default()
        };
        let updated = h.service.update_fields(&booking.id, patch).await.unwrap();

        assert_eq!(updated.return_at, t0() + Duration::days(10));
        assert_eq!(updated.pickup_location_id, "l-2");
        assert_eq!(updated.pickup_at, booking.pickup_at);
        assert_eq!(updated.return_location_id, booking.return_location_id);
        assert_eq!(updated.status, BookingStatus::Pending);
        // charge is never recomputed
        assert_eq!(updated.total_charge_cents, 45_000);
    }

    #[tokio::test]
    async fn test_update_fields_skips_validation() {
        let h = harness();
        let booking = h.service.request_booking(request(Duration::days(1))).await.unwrap();

        let patch = BookingPatch {
            return_at: Some(t0() - Duration::days(1)),
            status: Some(BookingStatus::Completed),
            return_location_id: Some("not-a-location".to_string()),
            ..Default::default()
        };
        let updated = h.service.update_fields(&booking.id, patch).await.unwrap();

        assert!(updated.return_at < updated.pickup_at);
        assert_eq!(updated.status, BookingStatus::Completed);
        assert_eq!(updated.return_location_id, "not-a-location");
    }

    #[tokio::test]
    async fn test_update_fields_unknown_booking() {
        let h = harness();
        let err = h
            .service
            .update_fields("missing", BookingPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }
}
