//! # Error Types
//!
//! Domain-specific error types for ceva-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ceva-core errors (this file)                                          │
//! │  ├── BookingError     - Lifecycle failures (what callers see)          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StoreError       - Collaborator failure crossing a port           │
//! │                                                                         │
//! │  ceva-db errors (separate crate)                                       │
//! │  └── DbError          - Database failures, converted into StoreError   │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - { code, message } JSON body + status code      │
//! │                                                                         │
//! │  Flow: DbError → StoreError → BookingError → ApiError → client         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Reference Kind
// =============================================================================

/// Which kind of referenced entity a booking request pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Customer,
    Vehicle,
    Location,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Customer => "customer",
            ReferenceKind::Vehicle => "vehicle",
            ReferenceKind::Location => "location",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Booking Error
// =============================================================================

/// Errors returned by the booking lifecycle operations.
///
/// Every variant is scoped to the single call that produced it; nothing here
/// is fatal to the process.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A referenced customer, vehicle or location does not exist.
    ///
    /// ## When This Occurs
    /// Checked in a fixed order when a booking is requested:
    /// customer, vehicle, pickup location, return location.
    #[error("{kind} not found: {id}")]
    ReferenceNotFound { kind: ReferenceKind, id: String },

    /// The return time is not strictly after the pickup time.
    #[error("return time must be after pickup time")]
    InvalidWindow,

    /// The booking id does not exist.
    #[error("booking not found: {0}")]
    NotFound(String),

    /// The requested status change violates the state machine.
    ///
    /// ## User Workflow
    /// ```text
    /// PATCH /bookings/{id}/confirm   (booking is Confirmed already)
    ///      │
    ///      ▼
    /// InvalidTransition("only pending bookings may be confirmed")
    ///      │
    ///      ▼
    /// 400 Bad Request
    /// ```
    #[error("{0}")]
    InvalidTransition(&'static str),

    /// Another caller changed the booking status between our read and our
    /// write. Nothing was written.
    #[error("booking {id} was modified concurrently")]
    Conflict { id: String },

    /// A collaborator (store or directory) failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl BookingError {
    pub fn reference_not_found(kind: ReferenceKind, id: impl Into<String>) -> Self {
        BookingError::ReferenceNotFound {
            kind,
            id: id.into(),
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Failure reported by a collaborator behind one of the [`crate::ports`]
/// traits.
///
/// The core never inspects the cause; it only carries it back to the caller.
#[derive(Debug, Error)]
#[error("storage failure: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid plate).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with BookingError.
pub type BookingResult<T> = Result<T, BookingError>;

/// Result type for collaborator calls.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
