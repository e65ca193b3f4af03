//! Store traits the services depend on.
//!
//! Each trait is implemented for PostgreSQL by the matching repository in
//! [`crate::repositories`]. Services hold them as `Arc<dyn ...Store>` so
//! tests can swap in in-memory doubles.

use assetdesk_core::asset::AssetStatus;
use assetdesk_core::types::DbId;
use async_trait::async_trait;

use crate::models::asset::{Asset, AssetFilter, NewAsset, UpdateAsset};
use crate::models::location::{CreateLocation, Location, UpdateLocation};
use crate::models::ticket::{NewTicket, Ticket, TicketFilter, UpdateTicket};
use crate::models::user::{NewUser, User, UserChanges};

/// A page of rows plus the total number of rows matching the query.
pub type Page<T> = (Vec<T>, i64);

#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn create(&self, input: &NewAsset) -> Result<Asset, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Asset>, sqlx::Error>;

    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<Asset>, sqlx::Error>;

    /// Apply the non-`None` fields of `input`. `None` if the row is missing.
    async fn update(&self, id: DbId, input: &UpdateAsset) -> Result<Option<Asset>, sqlx::Error>;

    async fn set_status(
        &self,
        id: DbId,
        status: AssetStatus,
    ) -> Result<Option<Asset>, sqlx::Error>;

    /// Add `delta` (possibly negative) to the quantity in one step.
    ///
    /// Returns `None` when the row is missing or the result would drop
    /// below zero; the quantity is left untouched in both cases.
    async fn adjust_quantity(&self, id: DbId, delta: i32) -> Result<Option<Asset>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn list(
        &self,
        filter: &AssetFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Asset>, sqlx::Error>;
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn create(&self, input: &NewTicket) -> Result<Ticket, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error>;

    async fn update(&self, id: DbId, input: &UpdateTicket)
        -> Result<Option<Ticket>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn list(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error>;

    async fn list_by_asset(
        &self,
        asset_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error>;

    async fn list_by_reporter(
        &self,
        reporter_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error>;

    /// Number of tickets referencing an asset, whatever their status.
    async fn count_by_asset(&self, asset_id: DbId) -> Result<i64, sqlx::Error>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn create(&self, input: &CreateLocation) -> Result<Location, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Location>, sqlx::Error>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, sqlx::Error>;

    async fn update(
        &self,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<Location>, sqlx::Error>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: &NewUser) -> Result<User, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    async fn update(&self, id: DbId, input: &UserChanges) -> Result<Option<User>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn list(&self, limit: i64, offset: i64) -> Result<Page<User>, sqlx::Error>;
}
