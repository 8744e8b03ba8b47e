//! # Repository Module
//!
//! SQLite repositories for Ceva Rental.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookingService (ceva-core)              apps/api handlers             │
//! │       │ port traits                           │ direct calls           │
//! │       ▼                                       ▼                        │
//! │  BookingRepository   impl BookingStore    list / count / delete        │
//! │  VehicleRepository   impl VehicleDirectory                             │
//! │  LocationRepository  impl LocationDirectory                            │
//! │  UserRepository      impl CustomerDirectory   delete_customer_cascade  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository is a cheap handle over the shared pool.

pub mod booking;
pub mod location;
pub mod user;
pub mod vehicle;

use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Test Fixtures
// =============================================================================
