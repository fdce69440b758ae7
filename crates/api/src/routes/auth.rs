//! Authentication route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use domain::models::user::{Gender, User};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::{AuthError, AuthResult, AuthService, NewAccount};

/// Request to register a new account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "last_name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(custom(function = "shared::validation::validate_birthday"))]
    pub birthday: Option<NaiveDate>,

    pub gender: Option<Gender>,

    #[validate(length(max = 255, message = "address must be at most 255 characters"))]
    pub address: Option<String>,

    /// Only used by admin registration; ignored otherwise.
    #[validate(length(max = 200, message = "organization_name must be at most 200 characters"))]
    pub organization_name: Option<String>,
}

impl RegisterRequest {
    fn into_account(self) -> NewAccount {
        NewAccount {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            gender: self.gender,
            address: self.address,
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Refresh token request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Change password request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "current_password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "new_password must be 8-128 characters"))]
    pub new_password: String,
}

/// Response carrying the authenticated user and a token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: result.expires_in,
        }
    }
}

/// Token pair response for refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

fn auth_service(state: &AppState) -> Result<AuthService, ApiError> {
    AuthService::new(state.pool.clone(), &state.config.jwt).map_err(ApiError::from)
}

/// POST /api/v1/auth/register - register a regular user account.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;

    let service = auth_service(&state)?;
    let result = service.register(request.into_account()).await?;

    tracing::info!(user_id = %result.user.id, "User registered");
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/v1/auth/register-admin - register an admin account.
///
/// System-owner only. An organizer profile is created for the new admin.
pub async fn register_admin(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if !auth.user_role().can_register_staff() {
        return Err(ApiError::Forbidden(
            "System owner privileges required".to_string(),
        ));
    }
    request.validate()?;

    let service = auth_service(&state)?;
    let organization_name = request.organization_name.clone();
    let result = service
        .register_admin(request.into_account(), organization_name.as_deref())
        .await?;

    tracing::info!(user_id = %result.user.id, "Admin registered");
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/v1/auth/register-system-owner - register a system-owner account.
///
/// System-owner only.
pub async fn register_system_owner(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if !auth.user_role().can_register_staff() {
        return Err(ApiError::Forbidden(
            "System owner privileges required".to_string(),
        ));
    }
    request.validate()?;

    let service = auth_service(&state)?;
    let result = service.register_system_owner(request.into_account()).await?;

    tracing::info!(user_id = %result.user.id, "System owner registered");
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// POST /api/v1/auth/login - login with email and password.
///
/// A deactivated account gets a 403 carrying `is_deactivated: true` so
/// clients can offer the reactivation flow.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    let service = auth_service(&state)?;
    match service.login(&request.email, &request.password).await {
        Ok(result) => Ok(Json(AuthResponse::from(result)).into_response()),
        Err(AuthError::AccountDeactivated) => Ok((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "account_deactivated",
                "message": "Account is deactivated",
                "is_deactivated": true
            })),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// POST /api/v1/auth/reactivate - reactivate a deactivated account.
pub async fn reactivate(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let service = auth_service(&state)?;
    let result = service.reactivate(&request.email, &request.password).await?;

    tracing::info!(user_id = %result.user.id, "Account reactivated");
    Ok(Json(result.into()))
}

/// POST /api/v1/auth/deactivate - deactivate the caller's account.
pub async fn deactivate(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<StatusCode, ApiError> {
    let service = auth_service(&state)?;
    service.deactivate(auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, "Account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/refresh - exchange a refresh token for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let service = auth_service(&state)?;
    let result = service.refresh(&request.refresh_token).await?;

    Ok(Json(TokenResponse {
        access_token: result.access_token,
        refresh_token: result.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
    }))
}

/// POST /api/v1/auth/change-password - change the caller's password.
pub async fn change_password(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let service = auth_service(&state)?;
    service
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await?;

    tracing::info!(user_id = %auth.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "Secure1password".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            birthday: None,
            gender: None,
            address: None,
            organization_name: None,
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid_request()
        };
        assert!(short_password.validate().is_err());
    }

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "Secure1password".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            birthday: None,
            gender: None,
            address: None,
            organization_name: None,
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "whatever".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = LoginRequest {
            email: "jane@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }
}
