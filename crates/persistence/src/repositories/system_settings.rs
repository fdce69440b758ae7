//! System settings repository. The table holds a single row with id 1.

use sqlx::PgPool;

use crate::entities::SystemSettingsEntity;
use crate::metrics::QueryTimer;

/// Repository for system settings.
#[derive(Clone)]
pub struct SystemSettingsRepository {
    pool: PgPool,
}

impl SystemSettingsRepository {
    /// Creates a new SystemSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, if present.
    pub async fn get(&self) -> Result<Option<SystemSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_system_settings");
        let result = sqlx::query_as::<_, SystemSettingsEntity>(
            r#"
            SELECT id, sidebar_color, sidebar_logo_url, organization_name, updated_at
            FROM system_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Upsert the settings row; unset fields keep their current value.
    pub async fn update(
        &self,
        sidebar_color: Option<&str>,
        sidebar_logo_url: Option<&str>,
        organization_name: Option<&str>,
    ) -> Result<SystemSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_system_settings");
        let result = sqlx::query_as::<_, SystemSettingsEntity>(
            r#"
            INSERT INTO system_settings (id, sidebar_color, sidebar_logo_url, organization_name)
            VALUES (
                1,
                COALESCE($1, '#2c3e50'),
                $2,
                COALESCE($3, 'Attendance System')
            )
            ON CONFLICT (id) DO UPDATE SET
                sidebar_color = COALESCE($1, system_settings.sidebar_color),
                sidebar_logo_url = COALESCE($2, system_settings.sidebar_logo_url),
                organization_name = COALESCE($3, system_settings.organization_name),
                updated_at = NOW()
            RETURNING id, sidebar_color, sidebar_logo_url, organization_name, updated_at
            "#,
        )
        .bind(sidebar_color)
        .bind(sidebar_logo_url)
        .bind(organization_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
