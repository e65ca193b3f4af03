//! Repository for the `tickets` table.

use assetdesk_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::ticket::{NewTicket, Ticket, TicketFilter, UpdateTicket};
use crate::store::{Page, TicketStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, asset_id, category, severity, duration, due_date, reporter_id, \
                       assigned_to, comment, status, resolution_comment, created_at, updated_at";

/// Filter clause shared by the list and count queries. Parameters `$1..$4`
/// are status, asset, severity and category; `NULL` disables a filter.
const FILTER: &str = "($1::text IS NULL OR status = $1)
               AND ($2::uuid IS NULL OR asset_id = $2)
               AND ($3::text IS NULL OR severity = $3)
               AND ($4::text IS NULL OR category ILIKE '%' || $4 || '%')";

/// Provides CRUD operations for tickets.
#[derive(Clone)]
pub struct TicketRepo {
    pool: PgPool,
}

impl TicketRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Page through tickets where `column = id`, newest first.
    async fn list_where(
        &self,
        column: &str,
        id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM tickets WHERE {column} = $1");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE {column} = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let tickets = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((tickets, total))
    }
}

#[async_trait]
impl TicketStore for TicketRepo {
    /// Insert a new ticket, returning the created row.
    async fn create(&self, input: &NewTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (asset_id, category, severity, duration, due_date, \
                                  reporter_id, comment, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(input.asset_id)
            .bind(&input.category)
            .bind(input.severity.as_str())
            .bind(input.duration)
            .bind(input.due_date)
            .bind(input.reporter_id)
            .bind(&input.comment)
            .bind(input.status.as_str())
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    async fn update(
        &self,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                category = COALESCE($2, category),
                comment = COALESCE($3, comment),
                status = COALESCE($4, status),
                assigned_to = COALESCE($5, assigned_to),
                resolution_comment = COALESCE($6, resolution_comment),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.comment)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.assigned_to)
            .bind(&input.resolution_comment)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List tickets matching `filter`, most recently created first.
    async fn list(
        &self,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        let status = filter.status.map(|s| s.as_str());
        let severity = filter.severity.map(|s| s.as_str());

        let count_query = format!("SELECT COUNT(*) FROM tickets WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(status)
            .bind(filter.asset_id)
            .bind(severity)
            .bind(&filter.category)
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE {FILTER}
             ORDER BY created_at DESC
             LIMIT $5 OFFSET $6"
        );
        let tickets = sqlx::query_as::<_, Ticket>(&query)
            .bind(status)
            .bind(filter.asset_id)
            .bind(severity)
            .bind(&filter.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((tickets, total))
    }

    async fn list_by_asset(
        &self,
        asset_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        self.list_where("asset_id", asset_id, limit, offset).await
    }

    async fn list_by_reporter(
        &self,
        reporter_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Page<Ticket>, sqlx::Error> {
        self.list_where("reporter_id", reporter_id, limit, offset)
            .await
    }

    async fn count_by_asset(&self, asset_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE asset_id = $1")
            .bind(asset_id)
            .fetch_one(&self.pool)
            .await
    }
}
