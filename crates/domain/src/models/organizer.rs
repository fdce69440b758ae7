//! Organizer domain models.
//!
//! An organizer profile is created automatically when an admin account
//! registers. Regular users enroll into an organizer's organization through an
//! explicit membership association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents an organizer profile owned by an admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Organizer {
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

/// A user's enrollment into an organizer's organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OrganizerMembership {
    pub organizer_id: Uuid,
    pub user_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Request to update an organizer profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateOrganizerRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "organization_name must be 1-200 characters"
    ))]
    pub organization_name: Option<String>,

    #[validate(length(max = 32, message = "contact_number must be at most 32 characters"))]
    pub contact_number: Option<String>,

    #[validate(length(max = 2000, message = "description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
}

/// Organizer summary for listings, with enrollment count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrganizerSummary {
    pub id: Uuid,
    pub organization_name: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub member_count: i64,
    pub is_active: bool,
}
