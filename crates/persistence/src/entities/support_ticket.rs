//! Support ticket entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::support::SupportTicket;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the support_tickets table.
#[derive(Debug, Clone, FromRow)]
pub struct SupportTicketEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub concern_type: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<SupportTicketEntity> for SupportTicket {
    fn from(entity: SupportTicketEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            concern_type: entity.concern_type,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}
