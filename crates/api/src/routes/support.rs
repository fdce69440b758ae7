//! Support ticket route handlers.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use domain::models::support::{CreateSupportTicketRequest, SupportTicket};
use persistence::repositories::SupportRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// POST /api/v1/support - file a support ticket.
pub async fn create_ticket(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateSupportTicketRequest>,
) -> Result<(StatusCode, Json<SupportTicket>), ApiError> {
    request.validate()?;

    let support = SupportRepository::new(state.pool.clone());
    let ticket = support
        .create_ticket(auth.user_id, &request.concern_type, &request.message)
        .await?;

    tracing::info!(user_id = %auth.user_id, "Support ticket filed");
    Ok((StatusCode::CREATED, Json(ticket.into())))
}

/// GET /api/v1/support/my - the caller's tickets, newest first.
pub async fn my_tickets(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<SupportTicket>>, ApiError> {
    let support = SupportRepository::new(state.pool.clone());
    let tickets = support.list_by_user(auth.user_id).await?;

    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}
