//! Attendance entities (database row mappings).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain::models::attendance::AttendanceRecord;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the attendance_records table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecordEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub attended: bool,
    pub checked_in_at: DateTime<Utc>,
}

impl From<AttendanceRecordEntity> for AttendanceRecord {
    fn from(entity: AttendanceRecordEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            event_id: entity.event_id,
            attended: entity.attended,
            checked_in_at: entity.checked_in_at,
        }
    }
}

/// An event a user attended, for the attended-events listing.
#[derive(Debug, Clone, FromRow)]
pub struct AttendedEventEntity {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub place: Option<String>,
    pub checked_in_at: DateTime<Utc>,
}
