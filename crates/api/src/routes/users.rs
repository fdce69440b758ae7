//! User profile and membership route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::attendance::AttendanceStats;
use domain::models::user::{UpdateProfileRequest, User, UserSummary};
use persistence::entities::AttendedEventEntity;
use persistence::repositories::{AttendanceRepository, OrganizerRepository, UserRepository};
use shared::pagination::{decode_cursor, encode_cursor};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Query parameters for the user listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Cursor-paged user listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// An event the caller attended, with the check-in time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendedEvent {
    pub event_id: Uuid,
    pub name: String,
    pub event_date: chrono::NaiveDate,
    pub event_time: chrono::NaiveTime,
    pub place: Option<String>,
    pub checked_in_at: chrono::DateTime<chrono::Utc>,
}

impl From<AttendedEventEntity> for AttendedEvent {
    fn from(entity: AttendedEventEntity) -> Self {
        Self {
            event_id: entity.event_id,
            name: entity.name,
            event_date: entity.event_date,
            event_time: entity.event_time,
            place: entity.place,
            checked_in_at: entity.checked_in_at,
        }
    }
}

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

/// GET /api/v1/users/me - the caller's profile.
pub async fn me(State(state): State<AppState>, auth: UserAuth) -> Result<Json<User>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let entity = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// PUT /api/v1/users/me - update the caller's profile.
pub async fn update_me(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;

    let users = UserRepository::new(state.pool.clone());
    let entity = users
        .update_profile(
            auth.user_id,
            request.first_name.as_deref(),
            request.last_name.as_deref(),
            request.birthday,
            request.gender.map(Into::into),
            request.address.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// GET /api/v1/users - list users, cursor-paged. Admin only.
pub async fn list_users(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    auth.require_reports_access()?;

    let after = match query.cursor.as_deref() {
        Some(cursor) => Some(
            decode_cursor(cursor)
                .map_err(|_| ApiError::Validation("Invalid cursor".to_string()))?,
        ),
        None => None,
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let users = UserRepository::new(state.pool.clone());
    let entities = users.list_users(after, limit).await?;

    let next_cursor = if entities.len() as i64 == limit {
        entities
            .last()
            .map(|e| encode_cursor(e.created_at, e.id))
    } else {
        None
    };

    let summaries = entities
        .into_iter()
        .map(|e| UserSummary::from(User::from(e)))
        .collect();

    Ok(Json(ListUsersResponse {
        users: summaries,
        next_cursor,
    }))
}

/// POST /api/v1/organizers/:organizer_id/enroll - enroll the caller into an
/// organizer's organization. Idempotent.
pub async fn enroll(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(organizer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let organizers = OrganizerRepository::new(state.pool.clone());

    let organizer = organizers
        .find_by_id(organizer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Organizer not found".to_string()))?;
    if !organizer.is_active {
        return Err(ApiError::Validation(
            "Organizer is not active".to_string(),
        ));
    }

    let inserted = organizers.enroll(organizer_id, auth.user_id).await?;
    if inserted > 0 {
        tracing::info!(organizer_id = %organizer_id, user_id = %auth.user_id, "User enrolled");
        Ok(StatusCode::CREATED)
    } else {
        Ok(StatusCode::OK)
    }
}

/// DELETE /api/v1/organizers/:organizer_id/enroll - remove the caller's
/// enrollment.
pub async fn unenroll(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(organizer_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let organizers = OrganizerRepository::new(state.pool.clone());

    let removed = organizers.unenroll(organizer_id, auth.user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Enrollment not found".to_string()));
    }

    tracing::info!(organizer_id = %organizer_id, user_id = %auth.user_id, "User unenrolled");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/me/attended-events - events the caller attended.
pub async fn attended_events(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<AttendedEvent>>, ApiError> {
    let attendance = AttendanceRepository::new(state.pool.clone());
    let events = attendance.list_attended_events(auth.user_id).await?;

    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/users/me/attendance-stats - the caller's attendance counts
/// and percentage.
pub async fn attendance_stats(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<AttendanceStats>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let attendance = AttendanceRepository::new(state.pool.clone());
    let registered = attendance
        .count_registrations_for_email(&user.email)
        .await?;
    let attended = attendance.count_for_user(auth.user_id).await?;

    Ok(Json(AttendanceStats::new(registered, attended)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_users_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert!(query.cursor.is_none());
        assert!(query.limit.is_none());
    }

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(500i64.clamp(1, MAX_PAGE_SIZE), MAX_PAGE_SIZE);
        assert_eq!(0i64.clamp(1, MAX_PAGE_SIZE), 1);
        assert_eq!(DEFAULT_PAGE_SIZE.clamp(1, MAX_PAGE_SIZE), DEFAULT_PAGE_SIZE);
    }
}
