//! Admin reporting domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the events report: an event with its registration and
/// attendance counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventReportRow {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub owner_id: Uuid,
    pub registration_count: i64,
    pub attendance_count: i64,
}

/// Filters for the events report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventReportFilter {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub organizer_id: Option<Uuid>,
}

/// Events and attendance totals for one month of a year.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlySummaryRow {
    /// 1-12
    pub month: i32,
    pub event_count: i64,
    pub attendance_count: i64,
}

/// Per-attendee detail row for a single event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceDetailRow {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub attended: bool,
    pub checked_in_at: DateTime<Utc>,
}
