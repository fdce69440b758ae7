//! Event registration domain models and check-in code generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::REGISTRATION_CODE_LEN;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Approval status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Disapproved,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Disapproved => "disapproved",
        }
    }

    /// Only approved registrations can check in.
    pub fn can_check_in(&self) -> bool {
        matches!(self, RegistrationStatus::Approved)
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "disapproved" => Ok(RegistrationStatus::Disapproved),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a user's registration for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    /// Six-character uppercase alphanumeric check-in code, unique globally.
    pub code: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
}

/// Generates a random six-character uppercase alphanumeric check-in code.
///
/// Callers must retry against the code-unique index; collisions are rare but
/// possible in a 36^6 space.
pub fn generate_registration_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let chars: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    (0..REGISTRATION_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..chars.len());
            chars[idx] as char
        })
        .collect()
}

/// Response after pre-registering for an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PreRegisterResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub status: RegistrationStatus,
    pub code: String,
    pub is_approved: bool,
    pub message: String,
}

/// Response for a registration-status check. `status` is the registration
/// status, or the `NOT_REGISTERED` sentinel when no registration exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationStatusResponse {
    pub is_registered: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RegistrationStatusResponse {
    pub const NOT_REGISTERED: &'static str = "NOT_REGISTERED";

    pub fn not_registered() -> Self {
        Self {
            is_registered: false,
            status: Self::NOT_REGISTERED.to_string(),
            registration_id: None,
            code: None,
        }
    }

    pub fn registered(registration: &Registration) -> Self {
        Self {
            is_registered: true,
            status: registration.status.as_str().to_uppercase(),
            registration_id: Some(registration.id),
            code: Some(registration.code.clone()),
        }
    }
}

/// Request to verify a check-in code at the door.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct VerifyCodeRequest {
    pub event_id: Uuid,

    #[validate(custom(function = "shared::validation::validate_registration_code"))]
    pub code: String,
}

/// Outcome of a check-in code verification. Every response from the
/// verification endpoint carries the same shape, so scanner clients can key
/// on `status` alone; the attendee fields are present whenever a registration
/// was matched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VerifyCodeResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl VerifyCodeResponse {
    pub fn success(message: &str, user_name: String, user_email: String) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            user_name: Some(user_name),
            user_email: Some(user_email),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            user_name: None,
            user_email: None,
        }
    }

    /// Rejection that still names the attendee behind the scanned code.
    pub fn error_for(message: &str, user_name: String, user_email: String) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            user_name: Some(user_name),
            user_email: Some(user_email),
        }
    }
}

/// Summary of a registration for per-event listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl From<Registration> for RegistrationSummary {
    fn from(registration: Registration) -> Self {
        Self {
            id: registration.id,
            user_email: registration.user_email,
            user_name: registration.user_name,
            status: registration.status,
            registered_at: registration.registered_at,
            approved_at: registration.approved_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_registration_code_format() {
        let code = generate_registration_code();
        assert_eq!(code.len(), REGISTRATION_CODE_LEN);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(shared::validation::validate_registration_code(&code).is_ok());
    }

    #[test]
    fn test_generate_registration_code_uniqueness() {
        // With a 36^6 space, 100 draws should essentially never collide.
        let codes: Vec<String> = (0..100).map(|_| generate_registration_code()).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert!(unique.len() >= 99);
    }

    #[test]
    fn test_verify_code_response_shapes_agree() {
        let success = VerifyCodeResponse::success(
            "Attendance recorded",
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
        );
        let rejected = VerifyCodeResponse::error("Invalid code for this event");

        // Failure bodies carry the same status/message keys as success ones,
        // so scanners can key on `status` for every outcome.
        assert_eq!(success.status, "success");
        assert_eq!(rejected.status, "error");
        assert!(rejected.user_name.is_none());

        let replayed = VerifyCodeResponse::error_for(
            "User already recorded for the event",
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
        );
        assert_eq!(replayed.status, "error");
        assert_eq!(replayed.user_email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_status_can_check_in() {
        assert!(RegistrationStatus::Approved.can_check_in());
        assert!(!RegistrationStatus::Pending.can_check_in());
        assert!(!RegistrationStatus::Disapproved.can_check_in());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            RegistrationStatus::Pending,
            RegistrationStatus::Approved,
            RegistrationStatus::Disapproved,
        ] {
            assert_eq!(
                status.as_str().parse::<RegistrationStatus>().unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_not_registered_sentinel() {
        let response = RegistrationStatusResponse::not_registered();
        assert!(!response.is_registered);
        assert_eq!(response.status, "NOT_REGISTERED");
        assert!(response.code.is_none());
    }

    #[test]
    fn test_verify_code_request_validation() {
        let valid = VerifyCodeRequest {
            event_id: Uuid::new_v4(),
            code: "AB12CD".to_string(),
        };
        assert!(valid.validate().is_ok());

        let lowercase = VerifyCodeRequest {
            event_id: Uuid::new_v4(),
            code: "ab12cd".to_string(),
        };
        assert!(lowercase.validate().is_err());
    }
}
