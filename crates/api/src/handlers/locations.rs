//! Handlers for the `/locations` resource.

use assetdesk_core::access::Operation;
use assetdesk_core::types::DbId;
use assetdesk_db::models::location::{CreateLocation, UpdateLocation};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ApiResponse, ListPayload};
use crate::state::AppState;

/// GET /api/v1/locations
pub async fn list_locations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadLocation)?;
    let (limit, offset) = page.resolve();

    let (locations, total) = state.locations.list(limit, offset).await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        locations, total, limit, offset,
    ))))
}

/// POST /api/v1/locations
pub async fn create_location(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::CreateLocation)?;

    let location = state.locations.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(location, "Location created")),
    ))
}

/// GET /api/v1/locations/{id}
pub async fn get_location(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadLocation)?;

    let location = state.locations.get(id).await?;

    Ok(Json(ApiResponse::ok(location)))
}

/// PUT /api/v1/locations/{id}
pub async fn update_location(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::UpdateLocation)?;

    let location = state.locations.update(id, input).await?;

    Ok(Json(ApiResponse::with_message(location, "Location updated")))
}

/// DELETE /api/v1/locations/{id}
pub async fn delete_location(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::DeleteLocation)?;

    state.locations.delete(id).await?;

    Ok(Json(ApiResponse::with_message((), "Location deleted")))
}
