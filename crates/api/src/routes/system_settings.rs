//! System settings route handlers.

use axum::{extract::State, Json};
use validator::Validate;

use domain::models::system_settings::{SystemSettings, UpdateSystemSettingsRequest};
use persistence::repositories::SystemSettingsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// GET /api/v1/settings - instance-wide branding. Public, so login screens
/// can render before authentication. Falls back to defaults when the row
/// was never written.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SystemSettings>, ApiError> {
    let settings = SystemSettingsRepository::new(state.pool.clone());
    let current = settings
        .get()
        .await?
        .map(Into::into)
        .unwrap_or_default();

    Ok(Json(current))
}

/// PUT /api/v1/settings - update instance-wide branding. Admin only. Unset
/// fields keep their current value.
pub async fn update_settings(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateSystemSettingsRequest>,
) -> Result<Json<SystemSettings>, ApiError> {
    auth.require_reports_access()?;
    request.validate()?;

    let settings = SystemSettingsRepository::new(state.pool.clone());
    let updated = settings
        .update(
            request.sidebar_color.as_deref(),
            request.sidebar_logo_url.as_deref(),
            request.organization_name.as_deref(),
        )
        .await?;

    tracing::info!(updated_by = %auth.user_id, "System settings updated");
    Ok(Json(updated.into()))
}
