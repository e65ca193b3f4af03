pub mod assets;
pub mod auth;
pub mod health;
pub mod locations;
pub mod tickets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                   service + database health (public)
///
/// /auth/login                               login (public)
///
/// /users/me                                 caller's profile
/// /users/me/tickets                         tickets the caller reported
/// /users                                    list, create (admin)
/// /users/{id}                               get, update, delete (admin)
///
/// /assets                                   list, create
/// /assets/{id}                              get, update, delete
/// /assets/{id}/status                       overwrite status (PUT)
/// /assets/{id}/quantity/decrease            take units out (POST)
/// /assets/{id}/quantity/increase            return units (POST)
/// /assets/{id}/tickets                      tickets raised against the asset
///
/// /tickets                                  list, create
/// /tickets/{id}                             get, update, delete
/// /tickets/{id}/assign                      assign + in_progress (POST)
/// /tickets/{id}/resolve                     resolve (POST)
/// /tickets/{id}/close                       close (POST)
///
/// /locations                                list, create
/// /locations/{id}                           get, update, delete
/// ```
///
/// Role checks happen in the handlers through `AuthUser::authorize`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/assets", assets::router())
        .nest("/tickets", tickets::router())
        .nest("/locations", locations::router())
}
