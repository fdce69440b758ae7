//! Support ticket domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A support ticket filed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SupportTicket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub concern_type: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Request to file a support ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateSupportTicketRequest {
    #[validate(length(min = 1, max = 100, message = "concern_type must be 1-100 characters"))]
    pub concern_type: String,

    #[validate(length(min = 1, max = 5000, message = "message must be 1-5000 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ticket_validation() {
        let valid = CreateSupportTicketRequest {
            concern_type: "billing".to_string(),
            message: "My event shows the wrong price.".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_message = CreateSupportTicketRequest {
            concern_type: "billing".to_string(),
            message: String::new(),
        };
        assert!(empty_message.validate().is_err());
    }
}
