//! Handlers for the `/assets` resource.

use assetdesk_core::access::Operation;
use assetdesk_core::types::DbId;
use assetdesk_db::models::asset::{
    AdjustQuantity, AssetFilter, CreateAsset, UpdateAsset, UpdateAssetStatus,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, ListPayload};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Asset CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/assets
///
/// List assets. Filters: `type`, `status` (exact), `category`, `brand`
/// (case-insensitive substring).
pub async fn list_assets(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(filter): Query<AssetFilter>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadAsset)?;
    let (limit, offset) = page.resolve();

    let (assets, total) = state.assets.list(&filter, limit, offset).await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        assets, total, limit, offset,
    ))))
}

/// POST /api/v1/assets
///
/// Register a new asset. Admin only.
pub async fn create_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::CreateAsset)?;

    let asset = state.assets.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(asset, "Asset created")),
    ))
}

/// GET /api/v1/assets/{id}
pub async fn get_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadAsset)?;

    let asset = state.assets.get(id).await?;

    Ok(Json(ApiResponse::ok(asset)))
}

/// PUT /api/v1/assets/{id}
///
/// Partial update. Admin only.
pub async fn update_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::UpdateAsset)?;

    let asset = state.assets.update(id, input).await?;

    Ok(Json(ApiResponse::with_message(asset, "Asset updated")))
}

/// DELETE /api/v1/assets/{id}
///
/// Admin only. Refused while tickets reference the asset.
pub async fn delete_asset(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::DeleteAsset)?;

    state.assets.delete(id).await?;

    Ok(Json(ApiResponse::with_message((), "Asset deleted")))
}

// ---------------------------------------------------------------------------
// Asset state
// ---------------------------------------------------------------------------

/// PUT /api/v1/assets/{id}/status
pub async fn update_asset_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssetStatus>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeAssetState)?;

    let asset = state.assets.update_status(id, input.status).await?;

    Ok(Json(ApiResponse::with_message(asset, "Asset status updated")))
}

/// POST /api/v1/assets/{id}/quantity/decrease
pub async fn decrease_quantity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdjustQuantity>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeAssetState)?;

    let asset = state.assets.decrease_quantity(id, input.qty).await?;

    Ok(Json(ApiResponse::with_message(asset, "Quantity decreased")))
}

/// POST /api/v1/assets/{id}/quantity/increase
pub async fn increase_quantity(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdjustQuantity>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeAssetState)?;

    let asset = state.assets.increase_quantity(id, input.qty).await?;

    Ok(Json(ApiResponse::with_message(asset, "Quantity increased")))
}

// ---------------------------------------------------------------------------
// Related tickets
// ---------------------------------------------------------------------------

/// GET /api/v1/assets/{id}/tickets
pub async fn list_asset_tickets(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadTicket)?;
    let (limit, offset) = page.resolve();

    let (tickets, total) = state.tickets.list_by_asset(id, limit, offset).await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        tickets, total, limit, offset,
    ))))
}
