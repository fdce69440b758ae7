//! System settings entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::system_settings::SystemSettings;
use sqlx::FromRow;

/// Database row mapping for the system_settings table (single row, id = 1).
#[derive(Debug, Clone, FromRow)]
pub struct SystemSettingsEntity {
    pub id: i32,
    pub sidebar_color: String,
    pub sidebar_logo_url: Option<String>,
    pub organization_name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<SystemSettingsEntity> for SystemSettings {
    fn from(entity: SystemSettingsEntity) -> Self {
        Self {
            sidebar_color: entity.sidebar_color,
            sidebar_logo_url: entity.sidebar_logo_url,
            organization_name: entity.organization_name,
            updated_at: entity.updated_at,
        }
    }
}
