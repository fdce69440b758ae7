//! Event route handlers: creation with recurrence materialization, listings,
//! owner-only deletion and the QR scan check-in path.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::event::{generate_qr_code, CreateEventRequest, Event, RecurrencePattern};
use domain::services::recurrence::expand_occurrences;
use persistence::repositories::{
    AttendanceRepository, EventRepository, NewEvent, RegistrationRepository, UserRepository,
};
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_attendance_checked_in;

/// Response after creating an event, with any materialized recurring
/// instances.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventResponse {
    pub event: Event,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<Event>,
}

/// Request body for the QR scan check-in path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanRequest {
    pub qr_code: String,
}

/// Response after a successful QR scan check-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanResponse {
    pub status: String,
    pub message: String,
    pub event_id: Uuid,
    pub checked_in_at: chrono::DateTime<chrono::Utc>,
}

/// POST /api/v1/events - create an event.
///
/// Only admin and system-owner accounts own events. A QR payload is issued,
/// the price is normalized (free events cost zero), and a recurring pattern
/// is materialized into concrete instance rows up front.
pub async fn create_event(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<CreateEventResponse>), ApiError> {
    if !auth.user_role().is_organizer() {
        return Err(ApiError::Forbidden(
            "Organizer privileges required".to_string(),
        ));
    }
    request.validate()?;

    let events = EventRepository::new(state.pool.clone());

    let pattern = request.recurrence_pattern.unwrap_or(RecurrencePattern::None);
    let interval = request.recurrence_interval.unwrap_or(1);
    let is_free = request.is_free.unwrap_or(true);

    let new_event = NewEvent {
        name: request.name.clone(),
        event_date: request.event_date,
        event_time: request.event_time,
        place: request.place.clone(),
        description: request.description.clone(),
        owner_id: auth.user_id,
        qr_code: generate_qr_code(),
        is_free,
        price: request.normalized_price(),
        is_online: request.is_online.unwrap_or(false),
        meeting_url: request.meeting_url.clone(),
        max_capacity: request.max_capacity,
        registration_deadline: request.registration_deadline,
        category: request.category.clone(),
        requires_approval: request.requires_approval(),
        recurrence_pattern: pattern.into(),
        recurrence_interval: interval,
        recurrence_end_date: request.recurrence_end_date,
        recurrence_count: request.recurrence_count,
        original_event_id: None,
        is_recurring_instance: false,
    };

    let created = events.create_event(&new_event).await?;
    let event: Event = created.into();

    // Materialize recurring instances. Each gets its own QR payload.
    let mut instances = Vec::new();
    if pattern.is_recurring() {
        let dates = expand_occurrences(
            request.event_date,
            pattern,
            interval,
            request.recurrence_end_date,
            request.recurrence_count,
        );

        for date in dates {
            let instance = NewEvent {
                event_date: date,
                qr_code: generate_qr_code(),
                original_event_id: Some(event.id),
                is_recurring_instance: true,
                recurrence_pattern: RecurrencePattern::None.into(),
                recurrence_end_date: None,
                recurrence_count: None,
                ..new_event.clone()
            };
            let row = events.create_event(&instance).await?;
            instances.push(row.into());
        }
    }

    tracing::info!(
        event_id = %event.id,
        owner_id = %auth.user_id,
        instances = instances.len(),
        "Event created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse { event, instances }),
    ))
}

/// GET /api/v1/events - list all events.
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let entities = events.list_all().await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/events/my - events owned by the caller.
pub async fn my_events(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let entities = events.list_by_owner(auth.user_id).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/events/:event_id - fetch one event.
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let entity = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// GET /api/v1/events/free - list free events.
pub async fn list_free_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let entities = events.list_by_free_flag(true).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/events/paid - list paid events.
pub async fn list_paid_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let entities = events.list_by_free_flag(false).await?;

    Ok(Json(entities.into_iter().map(Into::into).collect()))
}

/// DELETE /api/v1/events/:event_id - delete an event. Owner only.
pub async fn delete_event(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event: Event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if !event.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden(
            "Not the owner of this event".to_string(),
        ));
    }

    events.delete_event(event_id).await?;

    tracing::info!(event_id = %event_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/events/:event_id/scan - QR check-in for the caller.
///
/// The scanned payload must match the event's QR code, and the caller must
/// hold an approved registration. The conflict-aware insert makes check-in
/// at-most-once.
pub async fn scan_event(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event: Event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if event.qr_code != request.qr_code {
        return Err(ApiError::Validation(
            "Invalid QR code for this event".to_string(),
        ));
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration = registrations
        .find_by_event_and_email(event_id, &normalize_email(&user.email))
        .await?
        .ok_or_else(|| {
            ApiError::Validation("No registration for this event".to_string())
        })?;

    let status: domain::models::registration::RegistrationStatus =
        registration.status.into();
    if !status.can_check_in() {
        return Err(ApiError::Validation(
            "Registration is not approved".to_string(),
        ));
    }

    let attendance = AttendanceRepository::new(state.pool.clone());
    let record = attendance
        .record_attendance(auth.user_id, event_id)
        .await?
        .ok_or_else(|| {
            ApiError::Validation("User already recorded for the event".to_string())
        })?;

    record_attendance_checked_in();
    tracing::info!(event_id = %event_id, user_id = %auth.user_id, "QR check-in recorded");

    Ok(Json(ScanResponse {
        status: "success".to_string(),
        message: "Attendance recorded".to_string(),
        event_id,
        checked_in_at: record.checked_in_at,
    }))
}
