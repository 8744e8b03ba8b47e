//! # ceva-core: Pure Business Logic for Ceva Rental
//!
//! This crate holds the booking lifecycle: pricing, the status state
//! machine, validation, and the service that ties them together. It does no
//! I/O of its own; storage is reached only through the traits in [`ports`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ceva Rental Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    POST /bookings, PATCH /bookings/:id/confirm, ...            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ceva-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  service  │  │ lifecycle │  │  pricing  │  │   money   │  │   │
//! │  │   │ Booking-  │  │Transition │  │ billed_   │  │   Money   │  │   │
//! │  │   │ Service   │  │           │  │ days      │  │           │  │   │
//! │  │   └─────┬─────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │         │ ports (traits)                                       │   │
//! │  └─────────┼───────────────────────────────────────────────────────┘   │
//! │            │                                                            │
//! │  ┌─────────▼───────────────────────────────────────────────────────┐   │
//! │  │                    ceva-db (Database Layer)                     │   │
//! │  │        SQLite repositories implementing the port traits         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Booking, Vehicle, Location, User)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Daily-rate pricing with the one-day minimum
//! - [`lifecycle`] - Booking status transitions
//! - [`ports`] - Collaborator traits
//! - [`service`] - The booking lifecycle manager
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use ceva_core::money::Money;
//! use ceva_core::pricing::rental_charge;
//! use chrono::{Duration, Utc};
//!
//! let pickup = Utc::now();
//! let rate = Money::from_cents(15_000);
//!
//! let charge = rental_charge(rate, pickup, pickup + Duration::days(3)).unwrap();
//! assert_eq!(charge.to_string(), "450.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod service;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ceva_core::Money` instead of
// `use ceva_core::money::Money`

pub use error::{BookingError, ReferenceKind, StoreError, ValidationError};
pub use money::Money;
pub use service::BookingService;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fewest days a rental is ever billed for.
///
/// A two-hour rental pays the same as a one-day rental.
pub const MIN_BILLED_DAYS: i64 = 1;
