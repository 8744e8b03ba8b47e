//! # Vehicle Repository
//!
//! Fleet records. The booking service only ever asks two questions of the
//! fleet, through [`VehicleDirectory`]: does this vehicle exist, and what is
//! its daily rate.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ceva_core::error::StoreResult;
use ceva_core::ports::VehicleDirectory;
use ceva_core::{Money, Vehicle};

/// Repository for vehicle database operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT
                id, plate, make, model, year, color,
                daily_rate_cents, category, description,
                available, featured, location_id,
                created_at, updated_at
            FROM vehicles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM vehicles WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Daily rate in cents, `None` if the vehicle does not exist.
    pub async fn daily_rate_cents(&self, id: &str) -> DbResult<Option<i64>> {
        let rate: Option<i64> =
            sqlx::query_scalar("SELECT daily_rate_cents FROM vehicles WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(rate)
    }

    /// Inserts a vehicle as given. Callers validate beforehand.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - plate already registered
    pub async fn insert(&self, vehicle: &Vehicle) -> DbResult<()> {
        debug!(plate = %vehicle.plate, "Inserting vehicle");

        sqlx::query(
            r#"
            INSERT INTO vehicles (
                id, plate, make, model, year, color,
                daily_rate_cents, category, description,
                available, featured, location_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.plate)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(vehicle.daily_rate_cents)
        .bind(&vehicle.category)
        .bind(&vehicle.description)
        .bind(vehicle.available)
        .bind(vehicle.featured)
        .bind(&vehicle.location_id)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl VehicleDirectory for VehicleRepository {
    async fn exists(&self, vehicle_id: &str) -> StoreResult<bool> {
        Ok(VehicleRepository::exists(self, vehicle_id).await?)
    }

    async fn daily_rate(&self, vehicle_id: &str) -> StoreResult<Option<Money>> {
        let cents = self.daily_rate_cents(vehicle_id).await?;
        Ok(cents.map(Money::from_cents))
    }
}
