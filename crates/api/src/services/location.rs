use std::sync::Arc;

use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::location::{CreateLocation, Location, UpdateLocation};
use assetdesk_db::store::{LocationStore, Page};
use validator::Validate;

use crate::error::AppResult;

/// CRUD over physical locations; names are unique.
#[derive(Clone)]
pub struct LocationService {
    locations: Arc<dyn LocationStore>,
}

impl LocationService {
    pub fn new(locations: Arc<dyn LocationStore>) -> Self {
        Self { locations }
    }

    pub async fn create(&self, input: CreateLocation) -> AppResult<Location> {
        input.validate()?;
        self.ensure_name_free(&input.name, None).await?;

        let location = self.locations.create(&input).await?;
        tracing::info!(location_id = %location.id, name = %location.name, "Location created");
        Ok(location)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Location> {
        self.locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Page<Location>> {
        Ok(self.locations.list(limit, offset).await?)
    }

    pub async fn update(&self, id: DbId, input: UpdateLocation) -> AppResult<Location> {
        input.validate()?;
        if let Some(name) = &input.name {
            self.ensure_name_free(name, Some(id)).await?;
        }

        self.locations
            .update(id, &input)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Delete a location. Assets pointing at it are detached, not removed.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.locations.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(location_id = %id, "Location deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, except: Option<DbId>) -> AppResult<()> {
        match self.locations.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != except => Err(CoreError::Conflict(format!(
                "Location with name '{name}' already exists"
            ))
            .into()),
            _ => Ok(()),
        }
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Location",
        id,
    }
}
