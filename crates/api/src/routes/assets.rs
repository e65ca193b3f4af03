//! Route definitions for the `/assets` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                        -> list_assets
/// POST   /                        -> create_asset (admin only)
/// GET    /{id}                    -> get_asset
/// PUT    /{id}                    -> update_asset (admin only)
/// DELETE /{id}                    -> delete_asset (admin only)
/// PUT    /{id}/status             -> update_asset_status (admin only)
/// POST   /{id}/quantity/decrease  -> decrease_quantity (admin only)
/// POST   /{id}/quantity/increase  -> increase_quantity (admin only)
/// GET    /{id}/tickets            -> list_asset_tickets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/status", put(assets::update_asset_status))
        .route("/{id}/quantity/decrease", post(assets::decrease_quantity))
        .route("/{id}/quantity/increase", post(assets::increase_quantity))
        .route("/{id}/tickets", get(assets::list_asset_tickets))
}
