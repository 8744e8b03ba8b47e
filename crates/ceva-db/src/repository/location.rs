//! # Location Repository
//!
//! Pickup and return branches.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use ceva_core::error::StoreResult;
use ceva_core::ports::LocationDirectory;
use ceva_core::Location;

#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        LocationRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, address, created_at, updated_at FROM locations WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    /// All locations by name.
    pub async fn list(&self) -> DbResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, name, address, created_at, updated_at FROM locations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM locations WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    pub async fn insert(&self, location: &Location) -> DbResult<()> {
        debug!(name = %location.name, "Inserting location");

        sqlx::query(
            r#"
            INSERT INTO locations (id, name, address, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&location.id)
        .bind(&location.name)
        .bind(&location.address)
        .bind(location.created_at)
        .bind(location.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl LocationDirectory for LocationRepository {
    async fn exists(&self, location_id: &str) -> StoreResult<bool> {
        Ok(LocationRepository::exists(self, location_id).await?)
    }
}
