//! Route definitions for the `/tickets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes mounted at `/tickets`.
///
/// ```text
/// GET    /              -> list_tickets
/// POST   /              -> create_ticket (any role; caller is reporter)
/// GET    /{id}          -> get_ticket
/// PUT    /{id}          -> update_ticket (admin only)
/// DELETE /{id}          -> delete_ticket (admin only)
/// POST   /{id}/assign   -> assign_ticket (admin only)
/// POST   /{id}/resolve  -> resolve_ticket (admin only)
/// POST   /{id}/close    -> close_ticket (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list_tickets).post(tickets::create_ticket))
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route("/{id}/assign", post(tickets::assign_ticket))
        .route("/{id}/resolve", post(tickets::resolve_ticket))
        .route("/{id}/close", post(tickets::close_ticket))
}
