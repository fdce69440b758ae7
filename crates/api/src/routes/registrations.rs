//! Registration route handlers: pre-registration, approval workflow, the
//! caller's listings, and check-in code verification at the door.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::event::Event;
use domain::models::registration::{
    generate_registration_code, PreRegisterResponse, Registration, RegistrationStatus,
    RegistrationStatusResponse, RegistrationSummary, VerifyCodeRequest, VerifyCodeResponse,
};
use persistence::entities::RegistrationWithEventEntity;
use persistence::repositories::{
    AttendanceRepository, EventRepository, RegistrationRepository, UserRepository,
};
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_registration_created;

/// Plain confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response after an owner rules on a registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegistrationDecision {
    pub id: Uuid,
    pub status: RegistrationStatus,
    pub code: String,
    pub message: String,
    pub approved_at: Option<chrono::DateTime<Utc>>,
}

impl RegistrationDecision {
    fn new(registration: Registration, message: &str) -> Self {
        Self {
            id: registration.id,
            status: registration.status,
            code: registration.code,
            message: message.to_string(),
            approved_at: registration.approved_at,
        }
    }
}

/// One of the caller's registrations, joined with event info.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MyRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: chrono::NaiveDate,
    pub event_time: chrono::NaiveTime,
    pub place: Option<String>,
    pub code: String,
    pub status: RegistrationStatus,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl From<RegistrationWithEventEntity> for MyRegistration {
    fn from(entity: RegistrationWithEventEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            event_name: entity.event_name,
            event_date: entity.event_date,
            event_time: entity.event_time,
            place: entity.place,
            code: entity.code,
            status: entity.status.into(),
            registered_at: entity.registered_at,
        }
    }
}

/// Load an event and verify the caller owns it.
async fn owned_event(
    events: &EventRepository,
    event_id: Uuid,
    auth: &UserAuth,
) -> Result<Event, ApiError> {
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

    Ok(event)
}

/// POST /api/v1/events/:event_id/pre-register - register the caller for an
/// event.
///
/// Idempotent: registering again returns the existing registration with its
/// original code. Events that skip approval yield an approved registration
/// immediately; otherwise the registration starts pending.
pub async fn pre_register(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<(StatusCode, Json<PreRegisterResponse>), ApiError> {
    let events = EventRepository::new(state.pool.clone());
    let event: Event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?
        .into();

    if !event.is_open_for_registration(Utc::now()) {
        return Err(ApiError::Validation(
            "Event is not open for registration".to_string(),
        ));
    }

    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    let email = normalize_email(&user.email);
    let full_name = format!("{} {}", user.first_name, user.last_name);

    let status = if event.requires_approval {
        RegistrationStatus::Pending
    } else {
        RegistrationStatus::Approved
    };

    let registrations = RegistrationRepository::new(state.pool.clone());
    let inserted = registrations
        .insert_idempotent(
            event_id,
            &email,
            &full_name,
            status.into(),
            generate_registration_code,
        )
        .await?;

    let (registration, created): (Registration, bool) = match inserted {
        Some(entity) => (entity.into(), true),
        // Already registered: fetch the existing row.
        None => {
            let entity = registrations
                .find_by_event_and_email(event_id, &email)
                .await?
                .ok_or_else(|| {
                    ApiError::Internal("Registration disappeared during insert".to_string())
                })?;
            (entity.into(), false)
        }
    };

    let is_approved = registration.status == RegistrationStatus::Approved;
    let message = match (created, is_approved) {
        (true, true) => "Registered successfully. Your registration is approved.",
        (true, false) => "Registered successfully. Your registration is pending approval.",
        (false, _) => "You are already registered for this event.",
    };

    if created {
        record_registration_created(is_approved);
        tracing::info!(
            event_id = %event_id,
            registration_id = %registration.id,
            approved = is_approved,
            "Registration created"
        );
    }

    let response = PreRegisterResponse {
        id: registration.id,
        event_id,
        event_name: event.name,
        status: registration.status,
        code: registration.code,
        is_approved,
        message: message.to_string(),
    };
    let status_code = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status_code, Json(response)))
}

/// GET /api/v1/events/:event_id/registration-status - the caller's
/// registration status for an event. Never 404s on a missing registration;
/// the sentinel response says so instead.
pub async fn registration_status(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<RegistrationStatusResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let found = registrations
        .find_by_event_and_email(event_id, &normalize_email(&user.email))
        .await?;

    let response = match found {
        Some(entity) => {
            let registration: Registration = entity.into();
            RegistrationStatusResponse::registered(&registration)
        }
        None => RegistrationStatusResponse::not_registered(),
    };

    Ok(Json(response))
}

/// DELETE /api/v1/events/:event_id/registration - cancel the caller's
/// registration.
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let removed = registrations
        .delete_by_event_and_email(event_id, &normalize_email(&user.email))
        .await?;

    if removed == 0 {
        return Err(ApiError::Validation(
            "You are not registered for this event".to_string(),
        ));
    }

    tracing::info!(event_id = %event_id, user_id = %auth.user_id, "Registration cancelled");
    Ok(Json(MessageResponse {
        message: "Registration cancelled".to_string(),
    }))
}

/// GET /api/v1/registrations/my - the caller's registrations across events.
pub async fn my_registrations(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<MyRegistration>>, ApiError> {
    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let rows = registrations
        .list_by_email(&normalize_email(&user.email))
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/events/:event_id/registrations - all registrations for an
/// event. Owner only.
pub async fn list_event_registrations(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationSummary>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    owned_event(&events, event_id, &auth).await?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let rows = registrations.list_by_event(event_id).await?;

    Ok(Json(
        rows.into_iter()
            .map(|e| RegistrationSummary::from(Registration::from(e)))
            .collect(),
    ))
}

/// GET /api/v1/events/:event_id/registrations/approved - approved
/// registrations for an event. Public.
pub async fn list_approved_registrations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationSummary>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    if events.find_by_id(event_id).await?.is_none() {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    let registrations = RegistrationRepository::new(state.pool.clone());
    let rows = registrations
        .list_by_event_and_status(event_id, RegistrationStatus::Approved.into())
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|e| RegistrationSummary::from(Registration::from(e)))
            .collect(),
    ))
}

/// GET /api/v1/events/:event_id/registrations/pending - pending
/// registrations awaiting approval. Owner only.
pub async fn list_pending_registrations(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationSummary>>, ApiError> {
    let events = EventRepository::new(state.pool.clone());
    owned_event(&events, event_id, &auth).await?;

    let registrations = RegistrationRepository::new(state.pool.clone());
    let rows = registrations
        .list_by_event_and_status(event_id, RegistrationStatus::Pending.into())
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|e| RegistrationSummary::from(Registration::from(e)))
            .collect(),
    ))
}

/// POST /api/v1/registrations/:registration_id/approve - approve a pending
/// registration. Event owner only.
pub async fn approve_registration(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<RegistrationDecision>, ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration = registrations
        .find_by_id(registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let events = EventRepository::new(state.pool.clone());
    let event: Event = events
        .find_by_id(registration.event_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal("Registration references a missing event".to_string())
        })?
        .into();

    if !event.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden(
            "Not the owner of this event".to_string(),
        ));
    }

    let updated = registrations
        .approve(registration_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    tracing::info!(
        registration_id = %registration_id,
        approved_by = %auth.user_id,
        "Registration approved"
    );
    Ok(Json(RegistrationDecision::new(
        Registration::from(updated),
        "Registration approved",
    )))
}

/// POST /api/v1/registrations/:registration_id/disapprove - disapprove a
/// registration, clearing any approval stamp. Event owner only.
pub async fn disapprove_registration(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(registration_id): Path<Uuid>,
) -> Result<Json<RegistrationDecision>, ApiError> {
    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration = registrations
        .find_by_id(registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let events = EventRepository::new(state.pool.clone());
    let event: Event = events
        .find_by_id(registration.event_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal("Registration references a missing event".to_string())
        })?
        .into();

    if !event.is_owned_by(auth.user_id) {
        return Err(ApiError::Forbidden(
            "Not the owner of this event".to_string(),
        ));
    }

    let updated = registrations
        .disapprove(registration_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    tracing::info!(registration_id = %registration_id, "Registration disapproved");
    Ok(Json(RegistrationDecision::new(
        Registration::from(updated),
        "Registration disapproved",
    )))
}

/// Build the uniform 400 rejection body for the verification endpoint.
fn verify_rejection(body: VerifyCodeResponse) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// POST /api/v1/registrations/verify-code - verify a check-in code at the
/// door and record attendance.
///
/// The code must belong to an approved registration for the given event.
/// Every rejection is a 400 with the same `{status:"error", message, ..}`
/// shape as the success body, so scanner clients key on `status` alone.
/// The conflict-aware attendance insert makes check-in at-most-once: a
/// replayed code gets an "already recorded" rejection naming the attendee.
pub async fn verify_code(
    State(state): State<AppState>,
    _auth: UserAuth,
    Json(request): Json<VerifyCodeRequest>,
) -> Result<Response, ApiError> {
    if request.validate().is_err() {
        return Ok(verify_rejection(VerifyCodeResponse::error(
            "Invalid code for this event",
        )));
    }

    let registrations = RegistrationRepository::new(state.pool.clone());
    let registration: Registration = match registrations
        .find_by_event_and_code(request.event_id, &request.code)
        .await?
    {
        Some(entity) => entity.into(),
        None => {
            return Ok(verify_rejection(VerifyCodeResponse::error(
                "Invalid code for this event",
            )));
        }
    };

    if !registration.status.can_check_in() {
        return Ok(verify_rejection(VerifyCodeResponse::error_for(
            "Registration is not approved",
            registration.user_name,
            registration.user_email,
        )));
    }

    // The registration stores a snapshot of the email; the account behind it
    // must still exist to attribute attendance.
    let users = UserRepository::new(state.pool.clone());
    let user = users
        .find_by_email(&registration.user_email)
        .await?
        .ok_or_else(|| {
            ApiError::Internal("Registered user account no longer exists".to_string())
        })?;

    let events = EventRepository::new(state.pool.clone());
    if events.find_by_id(request.event_id).await?.is_none() {
        return Err(ApiError::Internal(
            "Registration references a missing event".to_string(),
        ));
    }

    let attendance = AttendanceRepository::new(state.pool.clone());
    let recorded = attendance
        .record_attendance(user.id, request.event_id)
        .await?;

    if recorded.is_none() {
        // Replayed code: name the attendee so the door staff can see whose
        // code was scanned twice.
        return Ok(verify_rejection(VerifyCodeResponse::error_for(
            "User already recorded for the event",
            registration.user_name,
            registration.user_email,
        )));
    }

    crate::middleware::metrics::record_attendance_checked_in();
    tracing::info!(
        event_id = %request.event_id,
        user_id = %user.id,
        "Check-in code verified"
    );

    Ok(Json(VerifyCodeResponse::success(
        "Attendance recorded",
        registration.user_name,
        registration.user_email,
    ))
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use persistence::entities::RegistrationStatusDb;

    #[test]
    fn test_my_registration_from_entity() {
        let entity = RegistrationWithEventEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            code: "AB12CD".to_string(),
            status: RegistrationStatusDb::Approved,
            registered_at: Utc::now(),
            event_name: "Rust Meetup".to_string(),
            event_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            event_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            place: Some("Community Hall".to_string()),
        };

        let registration = MyRegistration::from(entity);
        assert_eq!(registration.event_name, "Rust Meetup");
        assert_eq!(registration.status, RegistrationStatus::Approved);
        assert_eq!(registration.code, "AB12CD");
    }

    #[test]
    fn test_registration_decision_carries_code_and_message() {
        let registration = Registration {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_email: "jane@example.com".to_string(),
            user_name: "Jane Doe".to_string(),
            code: "AB12CD".to_string(),
            status: RegistrationStatus::Approved,
            registered_at: Utc::now(),
            approved_at: Some(Utc::now()),
            approved_by: Some(Uuid::new_v4()),
        };

        let decision = RegistrationDecision::new(registration, "Registration approved");
        assert_eq!(decision.status, RegistrationStatus::Approved);
        assert_eq!(decision.code, "AB12CD");
        assert_eq!(decision.message, "Registration approved");
        assert!(decision.approved_at.is_some());
    }
}
