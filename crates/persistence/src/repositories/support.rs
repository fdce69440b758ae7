//! Support ticket repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SupportTicketEntity;
use crate::metrics::QueryTimer;

/// Repository for support tickets.
#[derive(Clone)]
pub struct SupportRepository {
    pool: PgPool,
}

impl SupportRepository {
    /// Creates a new SupportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// File a new support ticket.
    pub async fn create_ticket(
        &self,
        user_id: Uuid,
        concern_type: &str,
        message: &str,
    ) -> Result<SupportTicketEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_support_ticket");
        let result = sqlx::query_as::<_, SupportTicketEntity>(
            r#"
            INSERT INTO support_tickets (user_id, concern_type, message)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, concern_type, message, created_at
            "#,
        )
        .bind(user_id)
        .bind(concern_type)
        .bind(message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a user's tickets, newest first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SupportTicketEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_support_tickets_by_user");
        let result = sqlx::query_as::<_, SupportTicketEntity>(
            r#"
            SELECT id, user_id, concern_type, message, created_at
            FROM support_tickets
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: SupportRepository tests require database connection and are covered by integration tests
}
