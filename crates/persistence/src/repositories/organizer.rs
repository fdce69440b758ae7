//! Organizer repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{OrganizerEntity, OrganizerWithCountEntity};
use crate::metrics::QueryTimer;

/// Repository for organizer-related database operations.
#[derive(Clone)]
pub struct OrganizerRepository {
    pool: PgPool,
}

impl OrganizerRepository {
    /// Creates a new OrganizerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an organizer profile for an admin account.
    pub async fn create_organizer(
        &self,
        user_id: Uuid,
        email: &str,
        organization_name: Option<&str>,
    ) -> Result<OrganizerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_organizer");
        let result = sqlx::query_as::<_, OrganizerEntity>(
            r#"
            INSERT INTO organizers (user_id, email, organization_name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, email, organization_name, contact_number, description, website,
                      address, is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(organization_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find organizer by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrganizerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_organizer_by_id");
        let result = sqlx::query_as::<_, OrganizerEntity>(
            r#"
            SELECT id, user_id, email, organization_name, contact_number, description, website,
                   address, is_active, created_at, updated_at
            FROM organizers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the organizer profile owned by a user.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<OrganizerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_organizer_by_user_id");
        let result = sqlx::query_as::<_, OrganizerEntity>(
            r#"
            SELECT id, user_id, email, organization_name, contact_number, description, website,
                   address, is_active, created_at, updated_at
            FROM organizers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List active organizers with their enrollment counts.
    pub async fn list_active_with_counts(
        &self,
    ) -> Result<Vec<OrganizerWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_organizers");
        let result = sqlx::query_as::<_, OrganizerWithCountEntity>(
            r#"
            SELECT
                o.id, o.organization_name, o.email, o.website, o.is_active,
                (SELECT COUNT(*) FROM organizer_members m WHERE m.organizer_id = o.id) as member_count
            FROM organizers o
            WHERE o.is_active = true
            ORDER BY o.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update organizer profile fields; unset fields keep their current value.
    pub async fn update_organizer(
        &self,
        id: Uuid,
        organization_name: Option<&str>,
        contact_number: Option<&str>,
        description: Option<&str>,
        website: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<OrganizerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_organizer");
        let result = sqlx::query_as::<_, OrganizerEntity>(
            r#"
            UPDATE organizers
            SET organization_name = COALESCE($2, organization_name),
                contact_number = COALESCE($3, contact_number),
                description = COALESCE($4, description),
                website = COALESCE($5, website),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, email, organization_name, contact_number, description, website,
                      address, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(organization_name)
        .bind(contact_number)
        .bind(description)
        .bind(website)
        .bind(address)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deactivate an organizer profile (soft delete).
    pub async fn deactivate(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_organizer");
        let result = sqlx::query(
            r#"
            UPDATE organizers
            SET is_active = false, updated_at = NOW()
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Enroll a user into an organizer's organization. Idempotent: returns
    /// zero rows affected when the enrollment already exists.
    pub async fn enroll(&self, organizer_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("enroll_organizer_member");
        let result = sqlx::query(
            r#"
            INSERT INTO organizer_members (organizer_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (organizer_id, user_id) DO NOTHING
            "#,
        )
        .bind(organizer_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Remove a user's enrollment.
    pub async fn unenroll(&self, organizer_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("unenroll_organizer_member");
        let result = sqlx::query(
            r#"
            DELETE FROM organizer_members
            WHERE organizer_id = $1 AND user_id = $2
            "#,
        )
        .bind(organizer_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
