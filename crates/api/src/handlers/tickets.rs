//! Handlers for the `/tickets` resource.

use assetdesk_core::access::Operation;
use assetdesk_core::types::DbId;
use assetdesk_db::models::ticket::{
    AssignTicket, CreateTicket, ResolveTicket, TicketFilter, UpdateTicket,
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
// Ticket CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/tickets
///
/// Filters: `status`, `asset_id`, `severity` (exact), `category` (substring).
pub async fn list_tickets(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(filter): Query<TicketFilter>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadTicket)?;
    let (limit, offset) = page.resolve();

    let (tickets, total) = state.tickets.list(&filter, limit, offset).await?;

    Ok(Json(ApiResponse::ok(ListPayload::new(
        tickets, total, limit, offset,
    ))))
}

/// POST /api/v1/tickets
///
/// Open a ticket. Any authenticated user; the caller is recorded as reporter.
pub async fn create_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTicket>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::CreateTicket)?;

    let ticket = state.tickets.create(input, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(ticket, "Ticket created")),
    ))
}

/// GET /api/v1/tickets/{id}
pub async fn get_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ReadTicket)?;

    let ticket = state.tickets.get(id).await?;

    Ok(Json(ApiResponse::ok(ticket)))
}

/// PUT /api/v1/tickets/{id}
pub async fn update_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::UpdateTicket)?;

    let ticket = state.tickets.update(id, input).await?;

    Ok(Json(ApiResponse::with_message(ticket, "Ticket updated")))
}

/// DELETE /api/v1/tickets/{id}
pub async fn delete_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::DeleteTicket)?;

    state.tickets.delete(id).await?;

    Ok(Json(ApiResponse::with_message((), "Ticket deleted")))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/tickets/{id}/assign
pub async fn assign_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignTicket>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeTicketStatus)?;

    let ticket = state.tickets.assign(id, input.assigned_to).await?;

    Ok(Json(ApiResponse::with_message(ticket, "Ticket assigned")))
}

/// POST /api/v1/tickets/{id}/resolve
pub async fn resolve_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ResolveTicket>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeTicketStatus)?;

    let ticket = state
        .tickets
        .resolve(id, input.resolution_comment)
        .await?;

    Ok(Json(ApiResponse::with_message(ticket, "Ticket resolved")))
}

/// POST /api/v1/tickets/{id}/close
pub async fn close_ticket(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.authorize(Operation::ChangeTicketStatus)?;

    let ticket = state.tickets.close(id).await?;

    Ok(Json(ApiResponse::with_message(ticket, "Ticket closed")))
}
