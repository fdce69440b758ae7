//! Attendance repository for database operations.
//!
//! The (user_id, event_id) unique index is the at-most-once guarantee:
//! recording attendance is a conflict-aware insert, and a suppressed row
//! means the user was already checked in.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AttendanceRecordEntity, AttendedEventEntity};
use crate::metrics::QueryTimer;

/// Repository for attendance-related database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a check-in. Returns the new record, or `None` when attendance
    /// for (user_id, event_id) was already recorded.
    pub async fn record_attendance(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<AttendanceRecordEntity>, sqlx::Error> {
        let timer = QueryTimer::new("record_attendance");
        let result = sqlx::query_as::<_, AttendanceRecordEntity>(
            r#"
            INSERT INTO attendance_records (user_id, event_id, attended)
            VALUES ($1, $2, true)
            ON CONFLICT (user_id, event_id) DO NOTHING
            RETURNING id, user_id, event_id, attended, checked_in_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count a user's attendance records.
    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_attendance_for_user");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM attendance_records WHERE user_id = $1 AND attended = true
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count a user's registrations (by email, registrations are email-keyed).
    pub async fn count_registrations_for_email(&self, email: &str) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_registrations_for_email");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM registrations WHERE user_email = $1
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List the events a user attended, most recent check-in first.
    pub async fn list_attended_events(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AttendedEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_attended_events");
        let result = sqlx::query_as::<_, AttendedEventEntity>(
            r#"
            SELECT
                e.id as event_id, e.name, e.event_date, e.event_time, e.place,
                a.checked_in_at
            FROM attendance_records a
            JOIN events e ON a.event_id = e.id
            WHERE a.user_id = $1 AND a.attended = true
            ORDER BY a.checked_in_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: AttendanceRepository tests require database connection and are covered by integration tests
}
