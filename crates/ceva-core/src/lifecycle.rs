//! # Booking State Machine
//!
//! ```text
//!                 confirm              complete
//!   ┌─────────┐ ──────────► ┌───────────┐ ──────────► ┌───────────┐
//!   │ Pending │             │ Confirmed │             │ Completed │
//!   └────┬────┘             └─────┬─────┘             └───────────┘
//!        │ cancel                 │ cancel
//!        ▼                        ▼
//!   ┌─────────────────────────────────┐
//!   │            Cancelled            │
//!   └─────────────────────────────────┘
//! ```
//!
//! `Cancelled` and `Completed` have no outgoing transitions.

use std::fmt;

use crate::error::BookingError;
use crate::types::BookingStatus;

/// A status-changing operation on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Confirm,
    Cancel,
    Complete,
}

impl Transition {
    /// States this transition may start from.
    pub const fn allowed_from(&self) -> &'static [BookingStatus] {
        match self {
            Transition::Confirm => &[BookingStatus::Pending],
            Transition::Cancel => &[BookingStatus::Pending, BookingStatus::Confirmed],
            Transition::Complete => &[BookingStatus::Confirmed],
        }
    }

    pub const fn target(&self) -> BookingStatus {
        match self {
            Transition::Confirm => BookingStatus::Confirmed,
            Transition::Cancel => BookingStatus::Cancelled,
            Transition::Complete => BookingStatus::Completed,
        }
    }

    /// Message carried by `InvalidTransition` when the start state is wrong.
    pub const fn rejection(&self) -> &'static str {
        match self {
            Transition::Confirm => "only pending bookings may be confirmed",
            Transition::Cancel => "completed bookings may not be cancelled",
            Transition::Complete => "only confirmed bookings may be completed",
        }
    }

    /// Returns the resulting status, or `InvalidTransition` if `current` is
    /// not a legal start state.
    ///
    /// ```rust
    /// use ceva_core::lifecycle::Transition;
    /// use ceva_core::BookingStatus;
    ///
    /// assert_eq!(
    ///     Transition::Confirm.apply(BookingStatus::Pending).unwrap(),
    ///     BookingStatus::Confirmed
    /// );
    /// assert!(Transition::Complete.apply(BookingStatus::Pending).is_err());
    /// ```
    pub fn apply(&self, current: BookingStatus) -> Result<BookingStatus, BookingError> {
        if self.allowed_from().contains(&current) {
            Ok(self.target())
        } else {
            Err(BookingError::InvalidTransition(self.rejection()))
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transition::Confirm => "confirm",
            Transition::Cancel => "cancel",
            Transition::Complete => "complete",
        };
        f.write_str(name)
    }
}
