//! Registration entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::registration::{Registration, RegistrationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for registration_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "snake_case")]
pub enum RegistrationStatusDb {
    Pending,
    Approved,
    Disapproved,
}

impl From<RegistrationStatusDb> for RegistrationStatus {
    fn from(db_status: RegistrationStatusDb) -> Self {
        match db_status {
            RegistrationStatusDb::Pending => RegistrationStatus::Pending,
            RegistrationStatusDb::Approved => RegistrationStatus::Approved,
            RegistrationStatusDb::Disapproved => RegistrationStatus::Disapproved,
        }
    }
}

impl From<RegistrationStatus> for RegistrationStatusDb {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => RegistrationStatusDb::Pending,
            RegistrationStatus::Approved => RegistrationStatusDb::Approved,
            RegistrationStatus::Disapproved => RegistrationStatusDb::Disapproved,
        }
    }
}

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub code: String,
    pub status: RegistrationStatusDb,
    pub registered_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}

/// Registration entity with event info for the own-registrations listing.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithEventEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub code: String,
    pub status: RegistrationStatusDb,
    pub registered_at: DateTime<Utc>,
    // Event info
    pub event_name: String,
    pub event_date: chrono::NaiveDate,
    pub event_time: chrono::NaiveTime,
    pub place: Option<String>,
}

impl From<RegistrationEntity> for Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            user_email: entity.user_email,
            user_name: entity.user_name,
            code: entity.code,
            status: entity.status.into(),
            registered_at: entity.registered_at,
            approved_at: entity.approved_at,
            approved_by: entity.approved_by,
        }
    }
}
