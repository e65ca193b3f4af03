//! Ticket lifecycle: creation with a computed service level, then
//! assign, resolve and close.
//!
//! Transitions are permissive: assign, resolve and close apply to a ticket
//! in any status.

use std::sync::Arc;

use assetdesk_core::error::CoreError;
use assetdesk_core::ticket::{ServiceLevel, TicketSeverity, TicketStatus};
use assetdesk_core::types::DbId;
use assetdesk_db::models::ticket::{CreateTicket, NewTicket, Ticket, TicketFilter, UpdateTicket};
use assetdesk_db::store::{AssetStore, Page, TicketStore, UserStore};
use chrono::Utc;
use validator::Validate;

use crate::error::AppResult;

#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketStore>,
    assets: Arc<dyn AssetStore>,
    users: Arc<dyn UserStore>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketStore>,
        assets: Arc<dyn AssetStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            tickets,
            assets,
            users,
        }
    }

    /// Open a ticket against an existing asset, reported by `reporter_id`.
    ///
    /// The due date is `now + duration(severity)`. Ticket creation has no
    /// effect on the asset itself.
    pub async fn create(&self, input: CreateTicket, reporter_id: DbId) -> AppResult<Ticket> {
        input.validate()?;
        let severity: TicketSeverity = input.severity.parse()?;

        if self.assets.find_by_id(input.asset_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Asset",
                id: input.asset_id,
            }
            .into());
        }

        let level = ServiceLevel::compute(severity.as_str(), Utc::now());
        let new_ticket = NewTicket {
            asset_id: input.asset_id,
            category: input.category,
            severity,
            duration: level.duration_hours,
            due_date: level.due_date,
            reporter_id,
            comment: input.comment,
            status: TicketStatus::Open,
        };

        let ticket = self.tickets.create(&new_ticket).await?;
        tracing::info!(
            ticket_id = %ticket.id,
            asset_id = %ticket.asset_id,
            severity = %ticket.severity,
            due_date = %ticket.due_date,
            "Ticket opened"
        );
        Ok(ticket)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Ticket> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn list(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<Page<Ticket>> {
        Ok(self.tickets.list(filter, limit, offset).await?)
    }

    /// Tickets raised against one asset. `NotFound` if the asset is missing.
    pub async fn list_by_asset(
        &self,
        asset_id: DbId,
        limit: i64,
        offset: i64,
    ) -> AppResult<Page<Ticket>> {
        if self.assets.find_by_id(asset_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            }
            .into());
        }
        Ok(self.tickets.list_by_asset(asset_id, limit, offset).await?)
    }

    pub async fn list_by_reporter(
        &self,
        reporter_id: DbId,
        limit: i64,
        offset: i64,
    ) -> AppResult<Page<Ticket>> {
        Ok(self
            .tickets
            .list_by_reporter(reporter_id, limit, offset)
            .await?)
    }

    /// Apply a partial update. `created_at` is never touched.
    pub async fn update(&self, id: DbId, input: UpdateTicket) -> AppResult<Ticket> {
        input.validate()?;
        if let Some(assignee) = input.assigned_to {
            self.ensure_user(assignee).await?;
        }

        self.tickets
            .update(id, &input)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// Assign the ticket and move it to `in_progress`, whatever its status.
    pub async fn assign(&self, id: DbId, assignee_id: DbId) -> AppResult<Ticket> {
        self.get(id).await?;
        self.ensure_user(assignee_id).await?;

        let patch = UpdateTicket {
            assigned_to: Some(assignee_id),
            status: Some(TicketStatus::InProgress),
            ..Default::default()
        };
        let ticket = self.apply(id, &patch).await?;
        tracing::info!(ticket_id = %id, assignee_id = %assignee_id, "Ticket assigned");
        Ok(ticket)
    }

    /// Mark the ticket `resolved` and record how it was fixed. A missing
    /// ticket is reported before a blank comment.
    pub async fn resolve(&self, id: DbId, resolution_comment: String) -> AppResult<Ticket> {
        self.get(id).await?;
        if resolution_comment.trim().is_empty() {
            return Err(
                CoreError::field("resolution_comment", "resolution_comment is required").into(),
            );
        }

        let patch = UpdateTicket {
            status: Some(TicketStatus::Resolved),
            resolution_comment: Some(resolution_comment),
            ..Default::default()
        };
        let ticket = self.apply(id, &patch).await?;
        tracing::info!(ticket_id = %id, "Ticket resolved");
        Ok(ticket)
    }

    pub async fn close(&self, id: DbId) -> AppResult<Ticket> {
        let patch = UpdateTicket {
            status: Some(TicketStatus::Closed),
            ..Default::default()
        };
        let ticket = self.apply(id, &patch).await?;
        tracing::info!(ticket_id = %id, "Ticket closed");
        Ok(ticket)
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.tickets.delete(id).await? {
            return Err(not_found(id).into());
        }
        tracing::info!(ticket_id = %id, "Ticket deleted");
        Ok(())
    }

    async fn apply(&self, id: DbId, patch: &UpdateTicket) -> AppResult<Ticket> {
        self.tickets
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    async fn ensure_user(&self, user_id: DbId) -> AppResult<()> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "User",
                id: user_id,
            }
            .into());
        }
        Ok(())
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Ticket", id }
}
