//! User repository for database operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GenderDb, UserEntity, UserRoleDb};
use crate::metrics::QueryTimer;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new user account.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        birthday: Option<NaiveDate>,
        gender: GenderDb,
        role: UserRoleDb,
        address: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name, birthday, gender, role, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, email, password_hash, first_name, last_name, birthday, gender, role, address,
                      is_deactivated, is_deleted, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(birthday)
        .bind(gender)
        .bind(role)
        .bind(address)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find user by ID. Deleted accounts are invisible.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, birthday, gender, role, address,
                   is_deactivated, is_deleted, created_at, updated_at
            FROM users
            WHERE id = $1 AND is_deleted = false
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find user by email. Deactivated accounts are returned (login needs
    /// them to answer with the deactivation flow); deleted ones are not.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, birthday, gender, role, address,
                   is_deactivated, is_deleted, created_at, updated_at
            FROM users
            WHERE email = $1 AND is_deleted = false
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether any account with the given role exists.
    pub async fn role_exists(&self, role: UserRoleDb) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_user_role_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE role = $1 AND is_deleted = false)
            "#,
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update profile fields; unset fields keep their current value.
    pub async fn update_profile(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        birthday: Option<NaiveDate>,
        gender: Option<GenderDb>,
        address: Option<&str>,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_user_profile");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                birthday = COALESCE($4, birthday),
                gender = COALESCE($5, gender),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            RETURNING id, email, password_hash, first_name, last_name, birthday, gender, role, address,
                      is_deactivated, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(birthday)
        .bind(gender)
        .bind(address)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_user_password");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Set or clear the deactivation flag.
    pub async fn set_deactivated(&self, id: Uuid, deactivated: bool) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_user_deactivated");
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_deactivated = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            "#,
        )
        .bind(id)
        .bind(deactivated)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List users ordered by (created_at, id), cursor-paged.
    pub async fn list_users(
        &self,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_users");
        let (after_created, after_id) = match after {
            Some((created, id)) => (Some(created), Some(id)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, email, password_hash, first_name, last_name, birthday, gender, role, address,
                   is_deactivated, is_deleted, created_at, updated_at
            FROM users
            WHERE is_deleted = false
              AND ($1::timestamptz IS NULL OR (created_at, id) > ($1, $2))
            ORDER BY created_at, id
            LIMIT $3
            "#,
        )
        .bind(after_created)
        .bind(after_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: UserRepository tests require database connection and are covered by integration tests
}
