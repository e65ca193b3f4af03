//! Handlers for the `/auth` resource.

use assetdesk_db::models::user::LoginRequest;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::error::AppResult;
use crate::extract::Json;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state.users.login(input).await?;

    Ok(Json(ApiResponse::with_message(response, "Login successful")))
}
