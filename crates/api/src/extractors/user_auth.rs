//! User JWT authentication extractor.
//!
//! Provides an Axum extractor for validating JWT tokens from requests.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth as UserAuthData;
use domain::models::user::UserRole;
use shared::jwt::TokenRole;

/// Authenticated user information from JWT.
///
/// This extractor validates the Bearer token in the Authorization header
/// and provides access to the authenticated user's details. The role claim
/// is trusted as validated by signature verification.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Role from the JWT role claim.
    pub role: TokenRole,
    /// JWT ID (jti) for session tracking.
    pub jti: String,
}

impl UserAuth {
    /// The role claim mapped into the domain role type.
    pub fn user_role(&self) -> UserRole {
        self.role.into()
    }

    /// Rejects the request unless the role can view admin reports.
    pub fn require_reports_access(&self) -> Result<(), ApiError> {
        if self.user_role().can_view_reports() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "Admin privileges required".to_string(),
            ))
        }
    }

    /// Rejects the request unless the role can manage organizers.
    pub fn require_organizer_management(&self) -> Result<(), ApiError> {
        if self.user_role().can_manage_organizers() {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "System owner privileges required".to_string(),
            ))
        }
    }
}

impl From<UserAuthData> for UserAuth {
    fn from(data: UserAuthData) -> Self {
        Self {
            user_id: data.user_id,
            role: data.role,
            jti: data.jti,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // First, check if auth info was already inserted by middleware
        if let Some(auth) = parts.extensions.get::<UserAuthData>() {
            return Ok(auth.clone().into());
        }

        // Otherwise, extract and validate the token directly
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(ApiError::Unauthorized(
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Create JWT config
        let jwt_config =
            UserAuthData::create_jwt_config(&state.config.jwt).map_err(ApiError::Internal)?;

        // Validate the token
        let auth_data = UserAuthData::validate(&jwt_config, token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(auth_data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_auth(role: TokenRole) -> UserAuth {
        UserAuth {
            user_id: Uuid::new_v4(),
            role,
            jti: "test_jti".to_string(),
        }
    }

    #[test]
    fn test_user_auth_from_data() {
        let data = UserAuthData {
            user_id: Uuid::new_v4(),
            role: TokenRole::Admin,
            jti: "test_jti".to_string(),
        };
        let auth: UserAuth = data.into();
        assert_eq!(auth.role, TokenRole::Admin);
        assert!(!auth.jti.is_empty());
    }

    #[test]
    fn test_user_role_mapping() {
        assert_eq!(sample_auth(TokenRole::User).user_role(), UserRole::User);
        assert_eq!(sample_auth(TokenRole::Admin).user_role(), UserRole::Admin);
        assert_eq!(
            sample_auth(TokenRole::SystemOwner).user_role(),
            UserRole::SystemOwner
        );
    }

    #[test]
    fn test_require_reports_access() {
        assert!(sample_auth(TokenRole::User).require_reports_access().is_err());
        assert!(sample_auth(TokenRole::Admin).require_reports_access().is_ok());
        assert!(sample_auth(TokenRole::SystemOwner)
            .require_reports_access()
            .is_ok());
    }

    #[test]
    fn test_require_organizer_management() {
        assert!(sample_auth(TokenRole::User)
            .require_organizer_management()
            .is_err());
        assert!(sample_auth(TokenRole::Admin)
            .require_organizer_management()
            .is_err());
        assert!(sample_auth(TokenRole::SystemOwner)
            .require_organizer_management()
            .is_ok());
    }
}
