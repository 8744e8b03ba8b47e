//! # Rental Pricing
//!
//! ```text
//! charge = daily_rate × billed_days
//!
//! billed_days = whole days in (return_at - pickup_at), truncated,
//!               never less than MIN_BILLED_DAYS
//!
//!   2h   → 1 day        25h → 1 day        72h → 3 days
//! ```
//!
//! Partial days are not billed; a rental shorter than one day still pays
//! for one.

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::MIN_BILLED_DAYS;

/// Number of days billed for a rental window.
///
/// ```rust
/// use ceva_core::pricing::billed_days;
/// use chrono::{Duration, Utc};
///
/// let pickup = Utc::now();
/// assert_eq!(billed_days(pickup, pickup + Duration::hours(2)), 1);
/// assert_eq!(billed_days(pickup, pickup + Duration::hours(73)), 3);
/// ```
pub fn billed_days(pickup_at: DateTime<Utc>, return_at: DateTime<Utc>) -> i64 {
    // num_days truncates toward zero
    (return_at - pickup_at).num_days().max(MIN_BILLED_DAYS)
}

/// Total charge for renting at `daily_rate` over the window.
///
/// Fails only if the product overflows `i64` cents.
pub fn rental_charge(
    daily_rate: Money,
    pickup_at: DateTime<Utc>,
    return_at: DateTime<Utc>,
) -> Result<Money, ValidationError> {
    let days = billed_days(pickup_at, return_at);

    daily_rate
        .checked_times(days)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "total_charge".to_string(),
            min: 0,
            max: i64::MAX,
        })
}
