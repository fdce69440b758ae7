//! Organizer route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::organizer::{Organizer, OrganizerSummary, UpdateOrganizerRequest};
use persistence::repositories::OrganizerRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// GET /api/v1/organizers - list active organizers with enrollment counts.
pub async fn list_organizers(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrganizerSummary>>, ApiError> {
    let organizers = OrganizerRepository::new(state.pool.clone());
    let entities = organizers.list_active_with_counts().await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/organizers/:organizer_id - fetch one organizer profile.
pub async fn get_organizer(
    State(state): State<AppState>,
    Path(organizer_id): Path<Uuid>,
) -> Result<Json<Organizer>, ApiError> {
    let organizers = OrganizerRepository::new(state.pool.clone());
    let entity = organizers
        .find_by_id(organizer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organizer not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// GET /api/v1/organizers/by-user/:user_id - the organizer profile owned by
/// a user.
pub async fn get_organizer_by_user(
    State(state): State<AppState>,
    _auth: UserAuth,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Organizer>, ApiError> {
    let organizers = OrganizerRepository::new(state.pool.clone());
    let entity = organizers
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organizer not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// PUT /api/v1/organizers/:organizer_id - update an organizer profile.
///
/// Only the owning admin (or a system owner) may update.
pub async fn update_organizer(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(organizer_id): Path<Uuid>,
    Json(request): Json<UpdateOrganizerRequest>,
) -> Result<Json<Organizer>, ApiError> {
    request.validate()?;

    let organizers = OrganizerRepository::new(state.pool.clone());
    let existing = organizers
        .find_by_id(organizer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organizer not found".to_string()))?;

    if existing.user_id != auth.user_id && !auth.user_role().can_manage_organizers() {
        return Err(ApiError::Forbidden(
            "Not the owner of this organizer profile".to_string(),
        ));
    }

    let updated = organizers
        .update_organizer(
            organizer_id,
            request.organization_name.as_deref(),
            request.contact_number.as_deref(),
            request.description.as_deref(),
            request.website.as_deref(),
            request.address.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Organizer not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/organizers/:organizer_id - deactivate an organizer
/// profile (soft delete). System-owner only.
pub async fn deactivate_organizer(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(organizer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth.require_organizer_management()?;

    let organizers = OrganizerRepository::new(state.pool.clone());
    let updated = organizers.deactivate(organizer_id).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Organizer not found".to_string()));
    }

    tracing::info!(organizer_id = %organizer_id, "Organizer deactivated");
    Ok(StatusCode::NO_CONTENT)
}
