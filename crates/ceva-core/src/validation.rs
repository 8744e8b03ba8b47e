//! # Validation Module
//!
//! Input validation for bookings and the fleet records the repositories
//! insert.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: HTTP (apps/api)                                              │
//! │  └── Type validation (JSON deserialization, RFC 3339 timestamps)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ceva-core                                                    │
//! │  ├── Reference checks (BookingService, through the directories)        │
//! │  └── THIS MODULE: rental window, rates, names, plates                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK constraints                             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ceva_core::validation::{validate_plate, validate_daily_rate_cents};
//!
//! validate_plate("ABC-1D23").unwrap();
//! validate_daily_rate_cents(18_000).unwrap();
//! ```

use chrono::{DateTime, Utc};

use crate::error::{BookingError, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Rental Window
// =============================================================================

/// Checks that the return time is strictly after the pickup time.
///
/// Equal timestamps are rejected. Only applied when a booking is requested;
/// merge-patch edits skip it.
///
/// ```rust
/// use ceva_core::validation::validate_rental_window;
/// use chrono::{Duration, Utc};
///
/// let pickup = Utc::now();
/// assert!(validate_rental_window(pickup, pickup + Duration::hours(2)).is_ok());
/// assert!(validate_rental_window(pickup, pickup).is_err());
/// ```
pub fn validate_rental_window(
    pickup_at: DateTime<Utc>,
    return_at: DateTime<Utc>,
) -> Result<(), BookingError> {
    if return_at <= pickup_at {
        return Err(BookingError::InvalidWindow);
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a display name (customer, admin, location, vehicle make/model).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    validate_text(field, name, 200)
}

/// Validates a license plate.
///
/// ## Rules
/// - Must not be empty
/// - At most 10 characters
/// - Letters, digits and hyphens only
///
/// ```rust
/// use ceva_core::validation::validate_plate;
///
/// assert!(validate_plate("ABC-1234").is_ok());
/// assert!(validate_plate("").is_err());
/// assert!(validate_plate("AB C").is_err());
/// ```
pub fn validate_plate(plate: &str) -> ValidationResult<()> {
    validate_text("plate", plate, 10)?;

    if !plate
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "plate".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Very loose email check: one `@` with text on both sides and a dot in the
/// domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_text("email", email, 254)?;

    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a vehicle's daily rate in cents.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (courtesy vehicles)
pub fn validate_daily_rate_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "daily_rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a vehicle model year.
pub fn validate_model_year(year: i64) -> ValidationResult<()> {
    const MIN: i64 = 1950;
    const MAX: i64 = 2100;

    if !(MIN..=MAX).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: MIN,
            max: MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
