//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A daily rate of 149.90 for 7 days should be exactly 1049.30,           │
//! │  not 1049.3000000000002.                                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    14990 cents × 7 = 104930 cents                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ceva_core::money::Money;
//!
//! let daily_rate = Money::from_cents(15_000); // 150.00
//! let charge = daily_rate.checked_times(3).unwrap();
//! assert_eq!(charge.cents(), 45_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Vehicle.daily_rate_cents ──► pricing::rental_charge ──►               │
/// │                                   Booking.total_charge_cents            │
/// │                                                                         │
/// │  The charge is computed once, when the booking is requested, and is    │
/// │  never recomputed afterwards.                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use ceva_core::money::Money;
    ///
    /// let rate = Money::from_cents(18_000); // 180.00 per day
    /// assert_eq!(rate.cents(), 18_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal number of major units.
    ///
    /// Only for presentation (JSON `total_charge`); never feed the result
    /// back into arithmetic.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies by a day count, returning `None` on overflow.
    ///
    /// ```rust
    /// use ceva_core::money::Money;
    ///
    /// let rate = Money::from_cents(15_000);
    /// assert_eq!(rate.checked_times(3), Some(Money::from_cents(45_000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_times(2), None);
    /// ```
    #[inline]
    pub const fn checked_times(&self, days: i64) -> Option<Self> {
        match self.0.checked_mul(days) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`150.00`). Currency symbols and locale are the
/// client's concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
