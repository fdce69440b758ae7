//! User domain models and account roles.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::jwt::TokenRole;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Account role. Stored on the users table and carried in the JWT as an
/// explicit claim, so authorization checks never inspect anything but this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Admin,
    SystemOwner,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::SystemOwner => "system_owner",
        }
    }

    /// Returns true if this role owns an organizer profile and can create events.
    pub fn is_organizer(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SystemOwner)
    }

    /// Returns true if this role can view admin reports and list users.
    pub fn can_view_reports(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SystemOwner)
    }

    /// Returns true if this role can register admin and system-owner accounts.
    pub fn can_register_staff(&self) -> bool {
        matches!(self, UserRole::SystemOwner)
    }

    /// Returns true if this role can deactivate organizer profiles.
    pub fn can_manage_organizers(&self) -> bool {
        matches!(self, UserRole::SystemOwner)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            "system_owner" => Ok(UserRole::SystemOwner),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<UserRole> for TokenRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => TokenRole::User,
            UserRole::Admin => TokenRole::Admin,
            UserRole::SystemOwner => TokenRole::SystemOwner,
        }
    }
}

impl From<TokenRole> for UserRole {
    fn from(role: TokenRole) -> Self {
        match role {
            TokenRole::User => UserRole::User,
            TokenRole::Admin => UserRole::Admin,
            TokenRole::SystemOwner => UserRole::SystemOwner,
        }
    }
}

/// Self-reported gender on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "unspecified" => Ok(Gender::Unspecified),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// Represents a user account. The password hash never leaves the persistence
/// layer; this model is safe to serialize in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub gender: Gender,
    pub role: UserRole,
    pub address: Option<String>,
    pub is_deactivated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full name as shown on registrations and attendance records.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request to update the caller's profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "last_name must be 1-100 characters"))]
    pub last_name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_birthday"))]
    pub birthday: Option<NaiveDate>,

    pub gender: Option<Gender>,

    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,
}

/// Public summary of a user for admin listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_deactivated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_deactivated: user.is_deactivated,
            created_at: user.created_at,
        }
    }
}
