//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET    /me          -> get_me
/// GET    /me/tickets  -> list_my_tickets
/// GET    /            -> list_users (admin only)
/// POST   /            -> create_user (admin only)
/// GET    /{id}        -> get_user (admin only)
/// PUT    /{id}        -> update_user (admin only)
/// DELETE /{id}        -> delete_user (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_me))
        .route("/me/tickets", get(users::list_my_tickets))
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
