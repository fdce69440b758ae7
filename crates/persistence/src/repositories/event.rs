//! Event repository for database operations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventEntity, RecurrencePatternDb};
use crate::metrics::QueryTimer;

/// Column list shared by event queries.
const EVENT_COLUMNS: &str = r#"
    id, name, event_date, event_time, place, description, owner_id, qr_code,
    is_free, price, is_online, meeting_url, max_capacity, registration_deadline,
    status, category, requires_approval, recurrence_pattern, recurrence_interval,
    recurrence_end_date, recurrence_count, original_event_id, is_recurring_instance,
    created_at
"#;

/// Parameters for inserting an event row.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub place: Option<String>,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub qr_code: String,
    pub is_free: bool,
    pub price: Decimal,
    pub is_online: bool,
    pub meeting_url: Option<String>,
    pub max_capacity: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub requires_approval: bool,
    pub recurrence_pattern: RecurrencePatternDb,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub recurrence_count: Option<i32>,
    pub original_event_id: Option<Uuid>,
    pub is_recurring_instance: bool,
}

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an event row.
    pub async fn create_event(&self, new: &NewEvent) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let sql = format!(
            r#"
            INSERT INTO events (
                name, event_date, event_time, place, description, owner_id, qr_code,
                is_free, price, is_online, meeting_url, max_capacity, registration_deadline,
                category, requires_approval, recurrence_pattern, recurrence_interval,
                recurrence_end_date, recurrence_count, original_event_id, is_recurring_instance
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING {EVENT_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(&new.name)
            .bind(new.event_date)
            .bind(new.event_time)
            .bind(&new.place)
            .bind(&new.description)
            .bind(new.owner_id)
            .bind(&new.qr_code)
            .bind(new.is_free)
            .bind(new.price)
            .bind(new.is_online)
            .bind(&new.meeting_url)
            .bind(new.max_capacity)
            .bind(new.registration_deadline)
            .bind(&new.category)
            .bind(new.requires_approval)
            .bind(new.recurrence_pattern)
            .bind(new.recurrence_interval)
            .bind(new.recurrence_end_date)
            .bind(new.recurrence_count)
            .bind(new.original_event_id)
            .bind(new.is_recurring_instance)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List all events, soonest first.
    pub async fn list_all(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date, event_time, created_at"
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List events owned by a user.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_owner");
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE owner_id = $1 ORDER BY event_date, event_time"
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List events filtered by the free/paid flag.
    pub async fn list_by_free_flag(&self, is_free: bool) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_free_flag");
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE is_free = $1 ORDER BY event_date, event_time"
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(is_free)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete an event. Registrations, attendance records and recurring
    /// instances go with it (ON DELETE CASCADE).
    pub async fn delete_event(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: EventRepository tests require database connection and are covered by integration tests
}
