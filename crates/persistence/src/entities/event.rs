//! Event entity (database row mapping).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain::models::event::{Event, EventStatus, RecurrencePattern};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for event_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
pub enum EventStatusDb {
    Draft,
    Active,
    Full,
    Cancelled,
    Completed,
}

impl From<EventStatusDb> for EventStatus {
    fn from(db_status: EventStatusDb) -> Self {
        match db_status {
            EventStatusDb::Draft => EventStatus::Draft,
            EventStatusDb::Active => EventStatus::Active,
            EventStatusDb::Full => EventStatus::Full,
            EventStatusDb::Cancelled => EventStatus::Cancelled,
            EventStatusDb::Completed => EventStatus::Completed,
        }
    }
}

impl From<EventStatus> for EventStatusDb {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Draft => EventStatusDb::Draft,
            EventStatus::Active => EventStatusDb::Active,
            EventStatus::Full => EventStatusDb::Full,
            EventStatus::Cancelled => EventStatusDb::Cancelled,
            EventStatus::Completed => EventStatusDb::Completed,
        }
    }
}

/// Database enum for recurrence_pattern that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "recurrence_pattern", rename_all = "snake_case")]
pub enum RecurrencePatternDb {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<RecurrencePatternDb> for RecurrencePattern {
    fn from(db_pattern: RecurrencePatternDb) -> Self {
        match db_pattern {
            RecurrencePatternDb::None => RecurrencePattern::None,
            RecurrencePatternDb::Daily => RecurrencePattern::Daily,
            RecurrencePatternDb::Weekly => RecurrencePattern::Weekly,
            RecurrencePatternDb::Monthly => RecurrencePattern::Monthly,
            RecurrencePatternDb::Yearly => RecurrencePattern::Yearly,
        }
    }
}

impl From<RecurrencePattern> for RecurrencePatternDb {
    fn from(pattern: RecurrencePattern) -> Self {
        match pattern {
            RecurrencePattern::None => RecurrencePatternDb::None,
            RecurrencePattern::Daily => RecurrencePatternDb::Daily,
            RecurrencePattern::Weekly => RecurrencePatternDb::Weekly,
            RecurrencePattern::Monthly => RecurrencePatternDb::Monthly,
            RecurrencePattern::Yearly => RecurrencePatternDb::Yearly,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
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
    pub status: EventStatusDb,
    pub category: Option<String>,
    pub requires_approval: bool,
    pub recurrence_pattern: RecurrencePatternDb,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub recurrence_count: Option<i32>,
    pub original_event_id: Option<Uuid>,
    pub is_recurring_instance: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            event_date: entity.event_date,
            event_time: entity.event_time,
            place: entity.place,
            description: entity.description,
            owner_id: entity.owner_id,
            qr_code: entity.qr_code,
            is_free: entity.is_free,
            price: entity.price,
            is_online: entity.is_online,
            meeting_url: entity.meeting_url,
            max_capacity: entity.max_capacity,
            registration_deadline: entity.registration_deadline,
            status: entity.status.into(),
            category: entity.category,
            requires_approval: entity.requires_approval,
            recurrence_pattern: entity.recurrence_pattern.into(),
            recurrence_interval: entity.recurrence_interval,
            recurrence_end_date: entity.recurrence_end_date,
            recurrence_count: entity.recurrence_count,
            original_event_id: entity.original_event_id,
            is_recurring_instance: entity.is_recurring_instance,
            created_at: entity.created_at,
        }
    }
}
