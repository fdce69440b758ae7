//! Registration repository for database operations.
//!
//! Registration creation is conflict-aware on both unique constraints: the
//! (event_id, user_email) index makes pre-registration idempotent, and the
//! global code index backstops the random code generator.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RegistrationEntity, RegistrationStatusDb, RegistrationWithEventEntity};
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str = r#"
    id, event_id, user_email, user_name, code, status, registered_at, approved_at, approved_by
"#;

/// Name of the unique index backing the global code constraint.
const CODE_CONSTRAINT: &str = "registrations_code_key";

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration idempotently. Returns `None` when a registration
    /// for (event_id, user_email) already exists; the caller then fetches it.
    ///
    /// A collision on the global code index regenerates the code and retries;
    /// `generator` produces candidate codes.
    pub async fn insert_idempotent<F>(
        &self,
        event_id: Uuid,
        user_email: &str,
        user_name: &str,
        status: RegistrationStatusDb,
        generator: F,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut attempts = 0;

        loop {
            let code = self.generate_unique_code(&generator).await?;
            let timer = QueryTimer::new("insert_registration");
            let sql = format!(
                r#"
                INSERT INTO registrations (event_id, user_email, user_name, code, status)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (event_id, user_email) DO NOTHING
                RETURNING {REGISTRATION_COLUMNS}
                "#
            );
            let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
                .bind(event_id)
                .bind(user_email)
                .bind(user_name)
                .bind(&code)
                .bind(status)
                .fetch_optional(&self.pool)
                .await;
            timer.record();

            match result {
                // Inserted, or suppressed by the (event_id, user_email) conflict.
                Ok(row) => return Ok(row),
                // A concurrent insert took this code first: new code, try again.
                Err(sqlx::Error::Database(db_err))
                    if db_err.constraint() == Some(CODE_CONSTRAINT) =>
                {
                    attempts += 1;
                    if attempts > 100 {
                        return Err(sqlx::Error::Protocol(
                            "Could not generate unique registration code".to_string(),
                        ));
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Find registration by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let sql = format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1");
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find a user's registration for an event.
    pub async fn find_by_event_and_email(
        &self,
        event_id: Uuid,
        user_email: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_event_and_email");
        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_email = $2"
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .bind(user_email)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find a registration by event and check-in code. Codes are globally
    /// unique, but verification is always scoped to an event.
    pub async fn find_by_event_and_code(
        &self,
        event_id: Uuid,
        code: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_event_and_code");
        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND code = $2"
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .bind(code)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List a user's registrations with event info, newest first.
    pub async fn list_by_email(
        &self,
        user_email: &str,
    ) -> Result<Vec<RegistrationWithEventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_by_email");
        let result = sqlx::query_as::<_, RegistrationWithEventEntity>(
            r#"
            SELECT
                r.id, r.event_id, r.code, r.status, r.registered_at,
                e.name as event_name, e.event_date, e.event_time, e.place
            FROM registrations r
            JOIN events e ON r.event_id = e.id
            WHERE r.user_email = $1
            ORDER BY r.registered_at DESC
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all registrations for an event.
    pub async fn list_by_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_by_event");
        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY registered_at"
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List registrations for an event in a given status.
    pub async fn list_by_event_and_status(
        &self,
        event_id: Uuid,
        status: RegistrationStatusDb,
    ) -> Result<Vec<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_by_event_and_status");
        let sql = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND status = $2 ORDER BY registered_at"
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(event_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Approve a registration, stamping the approver and time.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("approve_registration");
        let sql = format!(
            r#"
            UPDATE registrations
            SET status = 'approved', approved_at = NOW(), approved_by = $2
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(id)
            .bind(approved_by)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Disapprove a registration, clearing any approval stamp.
    pub async fn disapprove(&self, id: Uuid) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("disapprove_registration");
        let sql = format!(
            r#"
            UPDATE registrations
            SET status = 'disapproved', approved_at = NULL, approved_by = NULL
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, RegistrationEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete a user's registration for an event, whatever its status.
    pub async fn delete_by_event_and_email(
        &self,
        event_id: Uuid,
        user_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_registration");
        let result = sqlx::query(
            r#"
            DELETE FROM registrations
            WHERE event_id = $1 AND user_email = $2
            "#,
        )
        .bind(event_id)
        .bind(user_email)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Check if a check-in code exists anywhere.
    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_registration_code_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM registrations WHERE code = $1)
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate a unique check-in code by retrying on collision.
    pub async fn generate_unique_code<F>(&self, generator: F) -> Result<String, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut code = generator();
        let mut attempts = 0;

        while self.code_exists(&code).await? {
            code = generator();
            attempts += 1;
            if attempts > 100 {
                return Err(sqlx::Error::Protocol(
                    "Could not generate unique registration code".to_string(),
                ));
            }
        }

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    // Note: RegistrationRepository tests require database connection and are covered by integration tests
}
