//! Ticket entity model and DTOs.

use assetdesk_core::ticket::{TicketSeverity, TicketStatus};
use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub asset_id: DbId,
    pub category: String,
    #[sqlx(try_from = "String")]
    pub severity: TicketSeverity,
    /// Hours between creation and `due_date`.
    pub duration: i32,
    pub due_date: Timestamp,
    pub reporter_id: DbId,
    pub assigned_to: Option<DbId>,
    pub comment: String,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    pub resolution_comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for opening a ticket. The reporter is the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicket {
    pub asset_id: DbId,
    #[validate(length(min = 1, max = 255, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "severity is required"))]
    pub severity: String,
    #[validate(length(min = 1, message = "comment is required"))]
    pub comment: String,
}

/// A ticket with its computed service level, ready to insert.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub asset_id: DbId,
    pub category: String,
    pub severity: TicketSeverity,
    pub duration: i32,
    pub due_date: Timestamp,
    pub reporter_id: DbId,
    pub comment: String,
    pub status: TicketStatus,
}

/// Patch for an existing ticket. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTicket {
    #[validate(length(min = 1, max = 255))]
    pub category: Option<String>,
    pub comment: Option<String>,
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<DbId>,
    pub resolution_comment: Option<String>,
}

/// Request body for `POST /tickets/{id}/assign`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignTicket {
    pub assigned_to: DbId,
}

/// Request body for `POST /tickets/{id}/resolve`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveTicket {
    #[validate(length(min = 1, message = "resolution_comment is required"))]
    pub resolution_comment: String,
}

/// Query filters for listing tickets. `category` is a case-insensitive
/// substring match; the rest match exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub asset_id: Option<DbId>,
    pub severity: Option<TicketSeverity>,
    pub category: Option<String>,
}
