//! Asset entity model and DTOs.

use assetdesk_core::asset::{AssetStatus, AssetType};
use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::location::Location;

/// A row from the `assets` table, with its location attached on read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub unique_id: String,
    pub name: String,
    pub comment: String,
    pub detail: String,
    pub qty: i32,
    pub brand: String,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[sqlx(try_from = "String")]
    pub status: AssetStatus,
    pub category: String,
    pub location_id: Option<DbId>,
    pub location_label: String,
    /// Populated by the repository from `location_id`.
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating an asset. `type`, `status` and `qty` are
/// optional; the asset service fills in defaults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 100, message = "unique_id is required"))]
    pub unique_id: String,
    #[validate(length(min = 1, max = 255, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub detail: String,
    pub qty: Option<i32>,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
    #[serde(default)]
    pub category: String,
    pub location_id: Option<DbId>,
    #[serde(default)]
    pub location_label: String,
}

/// A fully-defaulted asset ready to insert.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub unique_id: String,
    pub name: String,
    pub comment: String,
    pub detail: String,
    pub qty: i32,
    pub brand: String,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub category: String,
    pub location_id: Option<DbId>,
    pub location_label: String,
}

/// DTO for updating an existing asset. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub comment: Option<String>,
    pub detail: Option<String>,
    #[validate(range(min = 0, message = "qty cannot be negative"))]
    pub qty: Option<i32>,
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    /// Absent leaves the location alone; `null` detaches the asset.
    #[serde(default, deserialize_with = "nullable")]
    pub location_id: Option<Option<DbId>>,
    pub location_label: Option<String>,
}

/// Keep an explicit JSON `null` distinct from a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for `PUT /assets/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssetStatus {
    pub status: AssetStatus,
}

/// Request body for the quantity adjustment endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustQuantity {
    pub qty: i32,
}

/// Query filters for listing assets. `type` and `status` match exactly;
/// `category` and `brand` are case-insensitive substring matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFilter {
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub brand: Option<String>,
}
