//! # ceva-db: Database Layer for Ceva Rental
//!
//! SQLite storage for bookings and the records they reference, built on
//! sqlx. The repositories implement the port traits from `ceva-core`, so a
//! [`Database`] can be handed straight to a `BookingService`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ceva Rental Data Flow                            │
//! │                                                                         │
//! │  HTTP handler / BookingService                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ceva-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ BookingRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ VehicleRepo   │    │ 001_initial_ │  │   │
//! │  │   │               │    │ LocationRepo  │    │  schema.sql  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (./ceva.db by default)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ceva_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./ceva.db")).await?;
//! let pending = db.bookings().list_by_status(BookingStatus::Pending).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::booking::BookingRepository;
pub use repository::location::LocationRepository;
pub use repository::user::UserRepository;
pub use repository::vehicle::VehicleRepository;
