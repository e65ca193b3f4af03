//! Repository for the `locations` table.

use assetdesk_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::location::{CreateLocation, Location, UpdateLocation};
use crate::store::{LocationStore, Page};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, area, description, capacity, created_at, updated_at";

/// Provides CRUD operations for locations.
#[derive(Clone)]
pub struct LocationRepo {
    pool: PgPool,
}

impl LocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for LocationRepo {
    /// Insert a new location, returning the created row.
    async fn create(&self, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, area, description, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.area)
            .bind(&input.description)
            .bind(input.capacity)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a location by its exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE name = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = COALESCE($2, name),
                area = COALESCE($3, area),
                description = COALESCE($4, description),
                capacity = COALESCE($5, capacity),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.area)
            .bind(&input.description)
            .bind(input.capacity)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List locations alphabetically by name.
    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Location>, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY name LIMIT $1 OFFSET $2");
        let locations = sqlx::query_as::<_, Location>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((locations, total))
    }
}
