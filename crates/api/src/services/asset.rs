//! Asset inventory operations: creation defaults, status overwrite,
//! quantity adjustment and guarded deletion.

use std::sync::Arc;

use assetdesk_core::asset::{self, AssetStatus};
use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::asset::{Asset, AssetFilter, CreateAsset, NewAsset, UpdateAsset};
use assetdesk_db::store::{AssetStore, LocationStore, Page, TicketStore};
use validator::Validate;

use crate::error::AppResult;

#[derive(Clone)]
pub struct AssetService {
    assets: Arc<dyn AssetStore>,
    tickets: Arc<dyn TicketStore>,
    locations: Arc<dyn LocationStore>,
}

impl AssetService {
    pub fn new(
        assets: Arc<dyn AssetStore>,
        tickets: Arc<dyn TicketStore>,
        locations: Arc<dyn LocationStore>,
    ) -> Self {
        Self {
            assets,
            tickets,
            locations,
        }
    }

    /// Create an asset, defaulting `type` to `it`, `status` to `available`
    /// and a non-positive `qty` to 1.
    pub async fn create(&self, input: CreateAsset) -> AppResult<Asset> {
        input.validate()?;

        if self
            .assets
            .find_by_unique_id(&input.unique_id)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(format!(
                "Asset with unique_id '{}' already exists",
                input.unique_id
            ))
            .into());
        }
        self.ensure_location(input.location_id).await?;

        let new_asset = NewAsset {
            unique_id: input.unique_id,
            name: input.name,
            comment: input.comment,
            detail: input.detail,
            qty: asset::initial_quantity(input.qty),
            brand: input.brand,
            asset_type: input.asset_type.unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            category: input.category,
            location_id: input.location_id,
            location_label: input.location_label,
        };

        let created = self.assets.create(&new_asset).await?;
        tracing::info!(asset_id = %created.id, unique_id = %created.unique_id, "Asset created");
        Ok(created)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Asset> {
        self.assets
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Page<Asset>> {
        Ok(self.assets.list(filter, limit, offset).await?)
    }

    /// Apply a partial update. `created_at` is never touched.
    pub async fn update(&self, id: DbId, input: UpdateAsset) -> AppResult<Asset> {
        input.validate()?;
        self.ensure_location(input.location_id.flatten()).await?;

        self.assets
            .update(id, &input)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Overwrite the status with any of the enumerated values.
    pub async fn update_status(&self, id: DbId, status: AssetStatus) -> AppResult<Asset> {
        let updated = self
            .assets
            .set_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(asset_id = %id, status = %status, "Asset status changed");
        Ok(updated)
    }

    /// Take `qty` units out of stock. Never drives the quantity below zero.
    pub async fn decrease_quantity(&self, id: DbId, qty: i32) -> AppResult<Asset> {
        asset::validate_adjustment(qty)?;
        let current = self.get(id).await?;
        asset::decreased_quantity(current.qty, qty)?;

        match self.assets.adjust_quantity(id, -qty).await? {
            Some(updated) => {
                tracing::info!(asset_id = %id, qty, remaining = updated.qty, "Asset quantity decreased");
                Ok(updated)
            }
            // Lost a race with a concurrent adjustment or delete.
            None => {
                let latest = self.get(id).await?;
                Err(CoreError::InsufficientQuantity {
                    requested: qty,
                    available: latest.qty,
                }
                .into())
            }
        }
    }

    /// Return `qty` units to stock.
    pub async fn increase_quantity(&self, id: DbId, qty: i32) -> AppResult<Asset> {
        asset::validate_adjustment(qty)?;
        let current = self.get(id).await?;
        asset::increased_quantity(current.qty, qty)?;

        let updated = self
            .assets
            .adjust_quantity(id, qty)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(asset_id = %id, qty, remaining = updated.qty, "Asset quantity increased");
        Ok(updated)
    }

    /// Delete an asset. Refused with `Conflict` while any ticket references it.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.get(id).await?;

        let ticket_count = self.tickets.count_by_asset(id).await?;
        if ticket_count > 0 {
            return Err(CoreError::Conflict(format!(
                "Asset {id} is referenced by {ticket_count} ticket(s)"
            ))
            .into());
        }

        if !self.assets.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(asset_id = %id, "Asset deleted");
        Ok(())
    }

    async fn ensure_location(&self, location_id: Option<DbId>) -> AppResult<()> {
        if let Some(location_id) = location_id {
            if self.locations.find_by_id(location_id).await?.is_none() {
                return Err(CoreError::NotFound {
                    entity: "Location",
                    id: location_id,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Asset", id }
}
