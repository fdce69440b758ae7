//! Reporting repository: aggregate queries for the admin report endpoints.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AttendanceDetailEntity, EventReportEntity, MonthlySummaryEntity};
use crate::metrics::QueryTimer;

/// Repository for admin reports.
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    /// Creates a new ReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Events report: per-event registration and attendance counts, with
    /// optional date-range and organizer filters.
    pub async fn events_report(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        organizer_id: Option<Uuid>,
    ) -> Result<Vec<EventReportEntity>, sqlx::Error> {
        let timer = QueryTimer::new("events_report");
        let result = sqlx::query_as::<_, EventReportEntity>(
            r#"
            SELECT
                e.id as event_id, e.name, e.event_date, e.owner_id,
                (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.id) as registration_count,
                (SELECT COUNT(*) FROM attendance_records a WHERE a.event_id = e.id AND a.attended = true) as attendance_count
            FROM events e
            WHERE ($1::date IS NULL OR e.event_date >= $1)
              AND ($2::date IS NULL OR e.event_date <= $2)
              AND ($3::uuid IS NULL OR e.owner_id = (SELECT o.user_id FROM organizers o WHERE o.id = $3))
            ORDER BY e.event_date, e.created_at
            "#,
        )
        .bind(from_date)
        .bind(to_date)
        .bind(organizer_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Monthly summary for a year: events held and attendance recorded per
    /// month. Months without events are absent from the result.
    pub async fn monthly_summary(&self, year: i32) -> Result<Vec<MonthlySummaryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("monthly_summary");
        let result = sqlx::query_as::<_, MonthlySummaryEntity>(
            r#"
            SELECT
                EXTRACT(MONTH FROM e.event_date)::int4 as month,
                COUNT(DISTINCT e.id) as event_count,
                COUNT(a.id) as attendance_count
            FROM events e
            LEFT JOIN attendance_records a ON a.event_id = e.id AND a.attended = true
            WHERE EXTRACT(YEAR FROM e.event_date)::int4 = $1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Per-attendee details for a single event.
    pub async fn attendance_details(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<AttendanceDetailEntity>, sqlx::Error> {
        let timer = QueryTimer::new("attendance_details");
        let result = sqlx::query_as::<_, AttendanceDetailEntity>(
            r#"
            SELECT
                u.id as user_id,
                u.first_name || ' ' || u.last_name as user_name,
                u.email as user_email,
                a.attended, a.checked_in_at
            FROM attendance_records a
            JOIN users u ON a.user_id = u.id
            WHERE a.event_id = $1
            ORDER BY a.checked_in_at
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
