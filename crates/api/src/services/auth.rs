//! Authentication service for account registration, login, and token management.

use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use domain::models::user::{Gender, User, UserRole};
use persistence::repositories::{OrganizerRepository, UserRepository};
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::validation::{normalize_email, validate_password_strength};

use crate::config::JwtAuthConfig;
use crate::error::ApiError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => {
                ApiError::Conflict("Email already registered".to_string())
            }
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::AccountDeactivated => {
                ApiError::Forbidden("Account is deactivated".to_string())
            }
            AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthError::InvalidRefreshToken => {
                ApiError::Unauthorized("Invalid refresh token".to_string())
            }
            AuthError::TokenError(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::PasswordError(e) => ApiError::Internal(e.to_string()),
            AuthError::DatabaseError(e) => e.into(),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Fields for a new account, shared by all registration variants.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    organizers: OrganizerRepository,
    jwt_config: JwtConfig,
    access_token_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given database pool and JWT configuration.
    pub fn new(pool: PgPool, jwt_config: &JwtAuthConfig) -> Result<Self, AuthError> {
        // Convert literal \n sequences to actual newlines (for env var compatibility)
        let private_key = normalize_pem_key(&jwt_config.private_key);
        let public_key = normalize_pem_key(&jwt_config.public_key);

        let jwt = JwtConfig::with_leeway(
            &private_key,
            &public_key,
            jwt_config.access_token_expiry_secs,
            jwt_config.refresh_token_expiry_secs,
            jwt_config.leeway_secs,
        )
        .map_err(|e| AuthError::Internal(format!("Failed to initialize JWT: {}", e)))?;

        Ok(Self {
            users: UserRepository::new(pool.clone()),
            organizers: OrganizerRepository::new(pool),
            jwt_config: jwt,
            access_token_expiry: jwt_config.access_token_expiry_secs,
        })
    }

    /// Register a new regular user account.
    pub async fn register(&self, account: NewAccount) -> Result<AuthResult, AuthError> {
        self.register_with_role(account, UserRole::User).await
    }

    /// Register an admin account. Admins own events, so an organizer profile
    /// is created alongside the account.
    pub async fn register_admin(
        &self,
        account: NewAccount,
        organization_name: Option<&str>,
    ) -> Result<AuthResult, AuthError> {
        let result = self.register_with_role(account, UserRole::Admin).await?;

        self.organizers
            .create_organizer(result.user.id, &result.user.email, organization_name)
            .await?;

        Ok(result)
    }

    /// Register a system-owner account.
    pub async fn register_system_owner(&self, account: NewAccount) -> Result<AuthResult, AuthError> {
        self.register_with_role(account, UserRole::SystemOwner).await
    }

    async fn register_with_role(
        &self,
        account: NewAccount,
        role: UserRole,
    ) -> Result<AuthResult, AuthError> {
        validate_password_strength(&account.password)
            .map_err(|e| AuthError::WeakPassword(message_of(&e)))?;

        let email = normalize_email(&account.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&account.password)?;
        let gender = account.gender.unwrap_or(Gender::Unspecified);

        let created = self
            .users
            .create_user(
                &email,
                &password_hash,
                &account.first_name,
                &account.last_name,
                account.birthday,
                gender.into(),
                role.into(),
                account.address.as_deref(),
            )
            .await;

        // A concurrent registration can win the unique-email race
        let created = match created {
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                return Err(AuthError::EmailAlreadyExists);
            }
            other => other?,
        };

        let user: User = created.into();
        self.issue_tokens(user)
    }

    /// Login with email and password. Deactivated accounts are rejected with
    /// a distinct error so clients can offer the reactivation flow.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);

        let entity = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if entity.is_deactivated {
            return Err(AuthError::AccountDeactivated);
        }

        self.issue_tokens(entity.into())
    }

    /// Reactivate a deactivated account. Requires the account password, then
    /// clears the flag and logs the user in.
    pub async fn reactivate(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let email = normalize_email(email);

        let entity = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.users.set_deactivated(entity.id, false).await?;

        let mut user: User = entity.into();
        user.is_deactivated = false;
        self.issue_tokens(user)
    }

    /// Deactivate the caller's account. Sessions stay valid until token
    /// expiry, but login is refused afterwards.
    pub async fn deactivate(&self, user_id: Uuid) -> Result<(), AuthError> {
        let updated = self.users.set_deactivated(user_id, true).await?;
        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    /// Change the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password_strength(new_password)
            .map_err(|e| AuthError::WeakPassword(message_of(&e)))?;

        let entity = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(current_password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = hash_password(new_password)?;
        self.users.update_password(user_id, &new_hash).await?;

        Ok(())
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// The user is re-fetched so the new tokens carry the current role and a
    /// deactivated account cannot keep refreshing.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResult, AuthError> {
        let claims = self
            .jwt_config
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let entity = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if entity.is_deactivated {
            return Err(AuthError::AccountDeactivated);
        }

        let user: User = entity.into();
        let (access_token, _) = self
            .jwt_config
            .generate_access_token(user.id, user.role.into())?;
        let (refresh_token, _) = self
            .jwt_config
            .generate_refresh_token(user.id, user.role.into())?;

        Ok(RefreshResult {
            access_token,
            refresh_token,
            expires_in: self.access_token_expiry,
        })
    }

    fn issue_tokens(&self, user: User) -> Result<AuthResult, AuthError> {
        let (access_token, _) = self
            .jwt_config
            .generate_access_token(user.id, user.role.into())?;
        let (refresh_token, _) = self
            .jwt_config
            .generate_refresh_token(user.id, user.role.into())?;

        Ok(AuthResult {
            user,
            access_token,
            refresh_token,
            expires_in: self.access_token_expiry,
        })
    }
}

/// Normalize PEM key by converting literal \n sequences to actual newlines.
/// Some env file parsers also leave surrounding quotes in place.
fn normalize_pem_key(key: &str) -> String {
    key.trim_matches('"').trim_matches('\'').replace("\\n", "\n")
}

fn message_of(err: &validator::ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Password does not meet requirements".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pem_key_literal_newlines() {
        let raw = "-----BEGIN KEY-----\\nabc\\n-----END KEY-----";
        let normalized = normalize_pem_key(raw);
        assert_eq!(normalized.matches('\n').count(), 2);
    }

    #[test]
    fn test_normalize_pem_key_strips_quotes() {
        let raw = "\"-----BEGIN KEY-----\\nabc\\n-----END KEY-----\"";
        let normalized = normalize_pem_key(raw);
        assert!(!normalized.contains('"'));
    }

    #[test]
    fn test_normalize_pem_key_already_correct() {
        let raw = "-----BEGIN KEY-----\nabc\n-----END KEY-----";
        assert_eq!(normalize_pem_key(raw), raw);
    }

    #[test]
    fn test_auth_error_to_api_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::EmailAlreadyExists),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::AccountDeactivated),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::WeakPassword("weak".to_string())),
            ApiError::Validation(_)
        ));
    }
}
