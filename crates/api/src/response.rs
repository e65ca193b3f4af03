//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "success": true, "data": ..., "message": ... }`.
//! Failures are rendered by [`AppError`](crate::error::AppError).
//! Use these types instead of ad-hoc `serde_json::json!` bodies.

use assetdesk_core::pagination::PageInfo;
use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(asset)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// `data` payload of every list endpoint.
#[derive(Debug, Serialize)]
pub struct ListPayload<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T: Serialize> ListPayload<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            pagination: PageInfo::new(total, limit, offset),
        }
    }
}
