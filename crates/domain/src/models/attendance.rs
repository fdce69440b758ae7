//! Attendance domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded check-in of a user at an event. At most one record exists per
/// (user, event) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub attended: bool,
    pub checked_in_at: DateTime<Utc>,
}

/// Per-user attendance statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceStats {
    pub registered_count: i64,
    pub attended_count: i64,
    pub attendance_percentage: f64,
}

impl AttendanceStats {
    pub fn new(registered_count: i64, attended_count: i64) -> Self {
        let attendance_percentage = if registered_count > 0 {
            (attended_count as f64 / registered_count as f64) * 100.0
        } else {
            0.0
        };
        Self {
            registered_count,
            attended_count,
            attendance_percentage,
        }
    }
}
