//! Reporting entities (aggregate query row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::report::{AttendanceDetailRow, EventReportRow, MonthlySummaryRow};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the events report aggregate query.
#[derive(Debug, Clone, FromRow)]
pub struct EventReportEntity {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub owner_id: Uuid,
    pub registration_count: i64,
    pub attendance_count: i64,
}

impl From<EventReportEntity> for EventReportRow {
    fn from(entity: EventReportEntity) -> Self {
        Self {
            event_id: entity.event_id,
            name: entity.name,
            event_date: entity.event_date,
            owner_id: entity.owner_id,
            registration_count: entity.registration_count,
            attendance_count: entity.attendance_count,
        }
    }
}

/// Row of the monthly summary aggregate query.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlySummaryEntity {
    pub month: i32,
    pub event_count: i64,
    pub attendance_count: i64,
}

impl From<MonthlySummaryEntity> for MonthlySummaryRow {
    fn from(entity: MonthlySummaryEntity) -> Self {
        Self {
            month: entity.month,
            event_count: entity.event_count,
            attendance_count: entity.attendance_count,
        }
    }
}

/// Row of the per-event attendance detail query.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceDetailEntity {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub attended: bool,
    pub checked_in_at: DateTime<Utc>,
}

impl From<AttendanceDetailEntity> for AttendanceDetailRow {
    fn from(entity: AttendanceDetailEntity) -> Self {
        Self {
            user_id: entity.user_id,
            user_name: entity.user_name,
            user_email: entity.user_email,
            attended: entity.attended,
            checked_in_at: entity.checked_in_at,
        }
    }
}
