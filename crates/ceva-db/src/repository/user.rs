//! # User Repository
//!
//! Customers and admins share the `users` table; the `kind` column says
//! which variant of [`User`] a row decodes into.
//!
//! ```text
//!  users
//!  ┌────┬──────────┬──────┬───────┬────────────────┬────────┬─────────┐
//!  │ id │ kind     │ name │ email │ driver_license │ tax_id │ role    │
//!  ├────┼──────────┼──────┼───────┼────────────────┼────────┼─────────┤
//!  │ …  │ customer │ …    │ …     │ 123…           │ 123…   │ NULL    │
//!  │ …  │ admin    │ …    │ …     │ NULL           │ NULL   │ manager │
//!  └────┴──────────┴──────┴───────┴────────────────┴────────┴─────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use ceva_core::error::StoreResult;
use ceva_core::ports::CustomerDirectory;
use ceva_core::{Admin, Customer, User, UserIdentity};

/// Raw `users` row before it is split into a [`User`] variant.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    kind: String,
    name: String,
    email: String,
    phone: Option<String>,
    driver_license: Option<String>,
    tax_id: Option<String>,
    role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let identity = UserIdentity {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        let missing = |column: &str| {
            DbError::CorruptRow(format!("user {} has no {column}", identity.id))
        };

        match row.kind.as_str() {
            "customer" => {
                let driver_license = row.driver_license.ok_or_else(|| missing("driver_license"))?;
                let tax_id = row.tax_id.ok_or_else(|| missing("tax_id"))?;
                Ok(User::Customer(Customer {
                    identity,
                    driver_license,
                    tax_id,
                }))
            }
            "admin" => {
                let role = row.role.ok_or_else(|| missing("role"))?;
                Ok(User::Admin(Admin { identity, role }))
            }
            other => Err(DbError::CorruptRow(format!("unknown user kind '{other}'"))),
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id, kind, name, email, phone,
                driver_license, tax_id, role,
                created_at, updated_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// `true` only for rows of kind `customer`.
    pub async fn customer_exists(&self, id: &str) -> DbResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE id = ?1 AND kind = 'customer'")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Inserts either kind of user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        let identity = user.identity();
        debug!(id = %identity.id, kind = user.kind(), "Inserting user");

        let (driver_license, tax_id, role) = match user {
            User::Customer(c) => (Some(&c.driver_license), Some(&c.tax_id), None),
            User::Admin(a) => (None, None, Some(&a.role)),
        };

        sqlx::query(
            r#"
            INSERT INTO users (
                id, kind, name, email, phone,
                driver_license, tax_id, role,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&identity.id)
        .bind(user.kind())
        .bind(&identity.name)
        .bind(&identity.email)
        .bind(&identity.phone)
        .bind(driver_license)
        .bind(tax_id)
        .bind(role)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Deletes a customer and every booking they hold, in one transaction.
    ///
    /// ## Returns
    /// Number of bookings removed.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no customer with this id (admins do not count)
    pub async fn delete_customer_cascade(&self, id: &str) -> DbResult<u64> {
        let mut tx = self.pool.begin().await?;

        let bookings = sqlx::query("DELETE FROM bookings WHERE customer_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let users = sqlx::query("DELETE FROM users WHERE id = ?1 AND kind = 'customer'")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if users == 0 {
            // dropping tx rolls back the booking deletes
            return Err(DbError::not_found("Customer", id));
        }

        tx.commit().await?;

        info!(customer_id = %id, bookings, "Customer deleted with bookings");
        Ok(bookings)
    }
}

#[async_trait]
impl CustomerDirectory for UserRepository {
    async fn exists(&self, customer_id: &str) -> StoreResult<bool> {
        Ok(self.customer_exists(customer_id).await?)
    }
}
