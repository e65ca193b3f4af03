//! Handlers for `/users`: the caller's own profile plus admin management.

use assetdesk_core::access::Operation;
use assetdesk_core::types::DbId;
use assetdesk_db::models::user::{CreateUser, UpdateUser};
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
// Self-service
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadOwnProfile)?;

    let user = state.users.profile(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/v1/users/me/tickets
///
/// Tickets the caller reported.
pub async fn list_my_tickets(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadTicket)?;
    let (limit, offset) = page.resolve();

    let (tickets, total) = state
        .tickets
        .list_by_reporter(auth.user_id, limit, offset)
        .await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        tickets, total, limit, offset,
    ))))
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ManageUsers)?;
    let (limit, offset) = page.resolve();

    let (users, total) = state.users.list(limit, offset).await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        users, total, limit, offset,
    ))))
}

/// POST /api/v1/users
pub async fn create_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ManageUsers)?;

    let user = state.users.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(user, "User created")),
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ManageUsers)?;

    let user = state.users.get(id).await?;

    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ManageUsers)?;

    let user = state.users.update(id, input).await?;

    Ok(Json(ApiResponse::with_message(user, "User updated")))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ManageUsers)?;

    state.users.delete(id).await?;

    Ok(Json(ApiResponse::with_message((), "User deleted")))
}
