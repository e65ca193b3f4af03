//! Ticket enumerations and the service-level (due date) table.
//!
//! Lifecycle: `open -> in_progress -> resolved -> closed`. Transitions are
//! permissive: assigning, resolving and closing are accepted from any
//! current status, so the services only ever write the target status.

use chrono::Duration;

use crate::types::Timestamp;

text_enum! {
    /// Urgency of a ticket; drives its due date.
    pub enum TicketSeverity: "severity" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

text_enum! {
    pub enum TicketStatus: "status" {
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Hours allowed for a severity that is not in the table.
pub const DEFAULT_DURATION_HOURS: i32 = 24;

impl TicketSeverity {
    /// Hours between creation and the due date.
    pub fn duration_hours(self) -> i32 {
        match self {
            Self::Low => 72,
            Self::Medium => 48,
            Self::High => 24,
            Self::Critical => 4,
        }
    }
}

/// Look up the duration for a raw severity string, falling back to
/// [`DEFAULT_DURATION_HOURS`].
pub fn duration_hours(severity: &str) -> i32 {
    severity
        .parse::<TicketSeverity>()
        .map(TicketSeverity::duration_hours)
        .unwrap_or(DEFAULT_DURATION_HOURS)
}

/// Duration and due date computed for a new ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLevel {
    pub duration_hours: i32,
    pub due_date: Timestamp,
}

impl ServiceLevel {
    pub fn compute(severity: &str, now: Timestamp) -> Self {
        let duration_hours = duration_hours(severity);
        Self {
            duration_hours,
            due_date: now + Duration::hours(i64::from(duration_hours)),
        }
    }
}
