//! # Domain Types
//!
//! Core domain types used throughout Ceva Rental.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │       Booking        │   │    Vehicle      │   │    Location     │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id (UUID)           │   │  id (UUID)      │   │  id (UUID)      │  │
//! │  │  customer_id (FK)    │   │  plate          │   │  name           │  │
//! │  │  vehicle_id (FK)     │   │  daily_rate     │   │  address        │  │
//! │  │  pickup/return loc   │   │  available      │   └─────────────────┘  │
//! │  │  pickup_at/return_at │   └─────────────────┘                        │
//! │  │  total_charge_cents  │                                              │
//! │  │  status              │   ┌──────────────────────────────────────┐   │
//! │  └──────────────────────┘   │  User = Customer | Admin             │   │
//! │                             │  both embed UserIdentity by value    │   │
//! │  ┌──────────────────────┐   └──────────────────────────────────────┘   │
//! │  │    BookingStatus     │                                              │
//! │  │  Pending ─► Confirmed ─► Completed                                  │
//! │  │     └──────────┴──────► Cancelled                                   │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity id is a UUID v4 string assigned by the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Booking Status
// =============================================================================

/// Where a booking sits in its lifecycle.
///
/// `Cancelled` and `Completed` are terminal. Serialized as `"Pending"`,
/// `"Confirmed"`, ... in JSON and as lowercase text in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
pub enum BookingStatus {
    /// Requested, awaiting confirmation.
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Cancelled before completion.
    Cancelled,
    /// Vehicle returned, rental closed.
    Completed,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    /// Database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        };
        f.write_str(name)
    }
}

/// Case-insensitive parse, used for status path segments.
impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: BookingStatus::ALL.iter().map(|s| s.to_string()).collect(),
            })
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A rental booking.
///
/// The charge is fixed at creation time. Later edits through
/// [`BookingPatch`] never recompute it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Booking {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub customer_id: String,
    pub vehicle_id: String,
    pub pickup_location_id: String,
    pub return_location_id: String,

    /// Start of the rental window.
    #[ts(as = "String")]
    pub pickup_at: DateTime<Utc>,

    /// End of the rental window. Strictly after `pickup_at` at creation.
    #[ts(as = "String")]
    pub return_at: DateTime<Utc>,

    /// Total charge in cents (daily rate × billed days).
    pub total_charge_cents: i64,

    pub status: BookingStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the total charge as Money.
    #[inline]
    pub fn total_charge(&self) -> Money {
        Money::from_cents(self.total_charge_cents)
    }
}

// =============================================================================
// Booking Commands
// =============================================================================

/// Input for requesting a new booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBooking {
    pub customer_id: String,
    pub vehicle_id: String,
    pub pickup_location_id: String,
    pub return_location_id: String,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
}

/// A validated, priced booking handed to the store for insertion.
///
/// The store assigns `id`, the audit timestamps, and the initial
/// `Pending` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: String,
    pub vehicle_id: String,
    pub pickup_location_id: String,
    pub return_location_id: String,
    pub pickup_at: DateTime<Utc>,
    pub return_at: DateTime<Utc>,
    pub total_charge_cents: i64,
}

/// Merge-patch for an existing booking.
///
/// Absent and `null` fields both mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct BookingPatch {
    #[ts(as = "Option<String>")]
    pub pickup_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub return_at: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
    pub pickup_location_id: Option<String>,
    pub return_location_id: Option<String>,
}

impl BookingPatch {
    /// Applies every present field onto `booking`.
    ///
    /// Does not touch `total_charge_cents` or `updated_at`.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(pickup_at) = self.pickup_at {
            booking.pickup_at = pickup_at;
        }
        if let Some(return_at) = self.return_at {
            booking.return_at = return_at;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(id) = &self.pickup_location_id {
            booking.pickup_location_id = id.clone();
        }
        if let Some(id) = &self.return_location_id {
            booking.return_location_id = id.clone();
        }
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle in the rental fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vehicle {
    pub id: String,
    /// License plate, unique across the fleet.
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    /// Price per billed day in cents.
    pub daily_rate_cents: i64,
    /// Fleet category ("economy", "suv", ...).
    pub category: String,
    pub description: Option<String>,
    pub available: bool,
    pub featured: bool,
    /// Home location, if assigned.
    pub location_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Location
// =============================================================================

/// A pickup/return branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Users
// =============================================================================

/// Fields shared by every kind of user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A renting customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(flatten)]
    pub identity: UserIdentity,
    pub driver_license: String,
    pub tax_id: String,
}

/// A staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(flatten)]
    pub identity: UserIdentity,
    /// Staff role ("manager", "agent", ...).
    pub role: String,
}

/// Any user of the system. `kind` is the discriminator both in JSON and in
/// the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum User {
    Customer(Customer),
    Admin(Admin),
}

impl User {
    pub fn identity(&self) -> &UserIdentity {
        match self {
            User::Customer(c) => &c.identity,
            User::Admin(a) => &a.identity,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.identity().id
    }

    /// Value stored in the `kind` column.
    pub const fn kind(&self) -> &'static str {
        match self {
            User::Customer(_) => "customer",
            User::Admin(_) => "admin",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
