//! Event domain models, status and recurrence enums.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Active,
    Full,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Active => "active",
            EventStatus::Full => "full",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Completed => "completed",
        }
    }

    /// Returns true if new registrations are accepted in this status.
    pub fn accepts_registrations(&self) -> bool {
        matches!(self, EventStatus::Active)
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EventStatus::Draft),
            "active" => Ok(EventStatus::Active),
            "full" => Ok(EventStatus::Full),
            "cancelled" => Ok(EventStatus::Cancelled),
            "completed" => Ok(EventStatus::Completed),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recurrence pattern for repeating events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrencePattern::None => "none",
            RecurrencePattern::Daily => "daily",
            RecurrencePattern::Weekly => "weekly",
            RecurrencePattern::Monthly => "monthly",
            RecurrencePattern::Yearly => "yearly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RecurrencePattern::None)
    }
}

impl FromStr for RecurrencePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RecurrencePattern::None),
            "daily" => Ok(RecurrencePattern::Daily),
            "weekly" => Ok(RecurrencePattern::Weekly),
            "monthly" => Ok(RecurrencePattern::Monthly),
            "yearly" => Ok(RecurrencePattern::Yearly),
            _ => Err(format!("Invalid recurrence pattern: {}", s)),
        }
    }
}

/// Represents an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub place: Option<String>,
    pub description: Option<String>,
    pub owner_id: Uuid,
    /// Payload encoded into the event's check-in QR code.
    pub qr_code: String,
    pub is_free: bool,
    pub price: Decimal,
    pub is_online: bool,
    pub meeting_url: Option<String>,
    pub max_capacity: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub category: Option<String>,
    pub requires_approval: bool,
    pub recurrence_pattern: RecurrencePattern,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub recurrence_count: Option<i32>,
    /// Set on materialized occurrences of a recurring event.
    pub original_event_id: Option<Uuid>,
    pub is_recurring_instance: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Returns true if the given user owns this event.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Returns true if registrations are currently accepted: the event is
    /// active and the registration deadline (when set) has not passed.
    pub fn is_open_for_registration(&self, now: DateTime<Utc>) -> bool {
        if !self.status.accepts_registrations() {
            return false;
        }
        match self.registration_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

/// Generates a QR-code payload for a new event.
pub fn generate_qr_code() -> String {
    format!("EVT-{}", Uuid::new_v4())
}

/// Request to create a new event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,

    pub event_date: NaiveDate,
    pub event_time: NaiveTime,

    #[validate(length(max = 255, message = "place must be at most 255 characters"))]
    pub place: Option<String>,

    #[validate(length(max = 5000, message = "description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Defaults to true: a paid flag must be set explicitly.
    pub is_free: Option<bool>,

    pub price: Option<Decimal>,

    pub is_online: Option<bool>,

    #[validate(url(message = "meeting_url must be a valid URL"))]
    pub meeting_url: Option<String>,

    #[validate(range(min = 1, message = "max_capacity must be positive"))]
    pub max_capacity: Option<i32>,

    pub registration_deadline: Option<DateTime<Utc>>,

    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,

    /// Defaults to true when unset: approval is opt-out, not opt-in.
    pub requires_approval: Option<bool>,

    pub recurrence_pattern: Option<RecurrencePattern>,

    #[validate(range(min = 1, max = 365, message = "recurrence_interval must be 1-365"))]
    pub recurrence_interval: Option<i32>,

    pub recurrence_end_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 104, message = "recurrence_count must be 1-104"))]
    pub recurrence_count: Option<i32>,
}

impl CreateEventRequest {
    /// Whether approval is required: unset means required.
    pub fn requires_approval(&self) -> bool {
        self.requires_approval.unwrap_or(true)
    }

    /// Price after normalization: free events always cost zero.
    pub fn normalized_price(&self) -> Decimal {
        if self.is_free.unwrap_or(true) {
            Decimal::ZERO
        } else {
            self.price.unwrap_or(Decimal::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_request() -> CreateEventRequest {
        CreateEventRequest {
            name: "Rust Meetup".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            event_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            place: Some("Community Hall".to_string()),
            description: None,
            is_free: None,
            price: None,
            is_online: None,
            meeting_url: None,
            max_capacity: Some(50),
            registration_deadline: None,
            category: Some("tech".to_string()),
            requires_approval: None,
            recurrence_pattern: None,
            recurrence_interval: None,
            recurrence_end_date: None,
            recurrence_count: None,
        }
    }

    #[test]
    fn test_generate_qr_code_format() {
        let code = generate_qr_code();
        assert!(code.starts_with("EVT-"));
        assert!(Uuid::parse_str(&code[4..]).is_ok());
    }

    #[test]
    fn test_requires_approval_defaults_true() {
        let mut request = sample_request();
        assert!(request.requires_approval());

        request.requires_approval = Some(false);
        assert!(!request.requires_approval());
    }

    #[test]
    fn test_price_normalization() {
        let mut request = sample_request();
        request.is_free = Some(true);
        request.price = Some(Decimal::new(2500, 2));
        assert_eq!(request.normalized_price(), Decimal::ZERO);

        request.is_free = Some(false);
        assert_eq!(request.normalized_price(), Decimal::new(2500, 2));

        // Unset flag means free.
        request.is_free = None;
        assert_eq!(request.normalized_price(), Decimal::ZERO);
    }

    #[test]
    fn test_registration_open_respects_deadline() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();
        let mut event = Event {
            id: Uuid::new_v4(),
            name: "Workshop".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            event_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            place: None,
            description: None,
            owner_id: Uuid::new_v4(),
            qr_code: generate_qr_code(),
            is_free: true,
            price: Decimal::ZERO,
            is_online: false,
            meeting_url: None,
            max_capacity: None,
            registration_deadline: None,
            status: EventStatus::Active,
            category: None,
            requires_approval: true,
            recurrence_pattern: RecurrencePattern::None,
            recurrence_interval: 1,
            recurrence_end_date: None,
            recurrence_count: None,
            original_event_id: None,
            is_recurring_instance: false,
            created_at: now,
        };

        assert!(event.is_open_for_registration(now));

        event.registration_deadline = Some(now - chrono::Duration::hours(1));
        assert!(!event.is_open_for_registration(now));

        event.registration_deadline = Some(now + chrono::Duration::hours(1));
        assert!(event.is_open_for_registration(now));

        event.status = EventStatus::Cancelled;
        assert!(!event.is_open_for_registration(now));
    }

    #[test]
    fn test_create_event_request_validation() {
        let valid = sample_request();
        assert!(valid.validate().is_ok());

        let mut empty_name = sample_request();
        empty_name.name = String::new();
        assert!(empty_name.validate().is_err());

        let mut zero_capacity = sample_request();
        zero_capacity.max_capacity = Some(0);
        assert!(zero_capacity.validate().is_err());

        let mut bad_url = sample_request();
        bad_url.meeting_url = Some("nope".to_string());
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EventStatus::Draft,
            EventStatus::Active,
            EventStatus::Full,
            EventStatus::Cancelled,
            EventStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
        }
    }
}
