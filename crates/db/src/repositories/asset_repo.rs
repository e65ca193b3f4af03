//! Repository for the `assets` table.

use std::collections::HashMap;

use assetdesk_core::asset::AssetStatus;
use assetdesk_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::asset::{Asset, AssetFilter, NewAsset, UpdateAsset};
use crate::models::location::Location;
use crate::repositories::location_repo;
use crate::store::{AssetStore, Page};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, unique_id, name, comment, detail, qty, brand, type, status, \
                       category, location_id, location_label, created_at, updated_at";

/// Filter clause shared by the list and count queries. Parameters `$1..$4`
/// are type, status, category and brand; `NULL` disables a filter.
const FILTER: &str = "($1::text IS NULL OR type = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR category ILIKE '%' || $3 || '%')
               AND ($4::text IS NULL OR brand ILIKE '%' || $4 || '%')";

/// Provides CRUD operations for assets.
#[derive(Clone)]
pub struct AssetRepo {
    pool: PgPool,
}

impl AssetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fill in `location` for every asset that references one.
    async fn attach_locations(&self, assets: &mut [Asset]) -> Result<(), sqlx::Error> {
        let mut ids: Vec<DbId> = assets.iter().filter_map(|a| a.location_id).collect();
        if ids.is_empty() {
            return Ok(());
        }
        ids.sort_unstable();
        ids.dedup();

        let query = format!(
            "SELECT {} FROM locations WHERE id = ANY($1)",
            location_repo::COLUMNS
        );
        let locations: HashMap<DbId, Location> = sqlx::query_as::<_, Location>(&query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        for asset in assets.iter_mut() {
            asset.location = asset.location_id.and_then(|id| locations.get(&id).cloned());
        }
        Ok(())
    }

    async fn attach_location(&self, mut asset: Asset) -> Result<Asset, sqlx::Error> {
        self.attach_locations(std::slice::from_mut(&mut asset)).await?;
        Ok(asset)
    }

    async fn with_location(&self, asset: Option<Asset>) -> Result<Option<Asset>, sqlx::Error> {
        match asset {
            Some(asset) => self.attach_location(asset).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AssetStore for AssetRepo {
    /// Insert a new asset, returning the created row.
    async fn create(&self, input: &NewAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (unique_id, name, comment, detail, qty, brand, type, status, \
                                 category, location_id, location_label)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(&input.unique_id)
            .bind(&input.name)
            .bind(&input.comment)
            .bind(&input.detail)
            .bind(input.qty)
            .bind(&input.brand)
            .bind(input.asset_type.as_str())
            .bind(input.status.as_str())
            .bind(&input.category)
            .bind(input.location_id)
            .bind(&input.location_label)
            .fetch_one(&self.pool)
            .await?;
        self.attach_location(asset).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.with_location(asset).await
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE unique_id = $1");
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await?;
        self.with_location(asset).await
    }

    /// Update an asset. Only non-`None` fields in `input` are applied;
    /// `location_id: Some(None)` clears the location.
    async fn update(&self, id: DbId, input: &UpdateAsset) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                name = COALESCE($2, name),
                comment = COALESCE($3, comment),
                detail = COALESCE($4, detail),
                qty = COALESCE($5, qty),
                brand = COALESCE($6, brand),
                type = COALESCE($7, type),
                status = COALESCE($8, status),
                category = COALESCE($9, category),
                location_id = CASE WHEN $12 THEN $10 ELSE location_id END,
                location_label = COALESCE($11, location_label),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.comment)
            .bind(&input.detail)
            .bind(input.qty)
            .bind(&input.brand)
            .bind(input.asset_type.map(|t| t.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.category)
            .bind(input.location_id.flatten())
            .bind(&input.location_label)
            .bind(input.location_id.is_some())
            .fetch_optional(&self.pool)
            .await?;
        self.with_location(asset).await
    }

    async fn set_status(
        &self,
        id: DbId,
        status: AssetStatus,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await?;
        self.with_location(asset).await
    }

    async fn adjust_quantity(&self, id: DbId, delta: i32) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET qty = qty + $2, updated_at = NOW()
             WHERE id = $1 AND qty + $2 >= 0
             RETURNING {COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(delta)
            .fetch_optional(&self.pool)
            .await?;
        self.with_location(asset).await
    }

    /// Delete an asset by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List assets matching `filter`, most recently created first.
    async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Asset>, sqlx::Error> {
        let asset_type = filter.asset_type.map(|t| t.as_str());
        let status = filter.status.map(|s| s.as_str());

        let count_query = format!("SELECT COUNT(*) FROM assets WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(asset_type)
            .bind(status)
            .bind(&filter.category)
            .bind(&filter.brand)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM assets WHERE {FILTER}
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        let mut assets = sqlx::query_as::<_, Asset>(&query)
            .bind(asset_type)
            .bind(status)
            .bind(&filter.category)
            .bind(&filter.brand)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        self.attach_locations(&mut assets).await?;
        Ok((assets, total))
    }
}
