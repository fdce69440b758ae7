//! Organizer entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::organizer::{Organizer, OrganizerMembership, OrganizerSummary};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the organizers table.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizerEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub organization_name: Option<String>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrganizerEntity> for Organizer {
    fn from(entity: OrganizerEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            email: entity.email,
            organization_name: entity.organization_name,
            contact_number: entity.contact_number,
            description: entity.description,
            website: entity.website,
            address: entity.address,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Organizer entity with enrollment count for listings.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizerWithCountEntity {
    pub id: Uuid,
    pub organization_name: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub is_active: bool,
    pub member_count: i64,
}

impl From<OrganizerWithCountEntity> for OrganizerSummary {
    fn from(entity: OrganizerWithCountEntity) -> Self {
        Self {
            id: entity.id,
            organization_name: entity.organization_name,
            email: entity.email,
            website: entity.website,
            member_count: entity.member_count,
            is_active: entity.is_active,
        }
    }
}

/// Database row mapping for the organizer_members table.
#[derive(Debug, Clone, FromRow)]
pub struct OrganizerMembershipEntity {
    pub organizer_id: Uuid,
    pub user_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

impl From<OrganizerMembershipEntity> for OrganizerMembership {
    fn from(entity: OrganizerMembershipEntity) -> Self {
        Self {
            organizer_id: entity.organizer_id,
            user_id: entity.user_id,
            enrolled_at: entity.enrolled_at,
        }
    }
}
