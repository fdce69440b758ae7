//! Admin reporting route handlers. All endpoints require admin or
//! system-owner access.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::report::{
    AttendanceDetailRow, EventReportFilter, EventReportRow, MonthlySummaryRow,
};
use persistence::repositories::{EventRepository, ReportRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlySummaryQuery {
    /// Defaults to the current year.
    pub year: Option<i32>,
}

/// GET /api/v1/admin/reports/events - per-event registration and attendance
/// counts, optionally filtered by date range and organizer.
pub async fn events_report(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(filter): Query<EventReportFilter>,
) -> Result<Json<Vec<EventReportRow>>, ApiError> {
    auth.require_reports_access()?;

    if let (Some(from), Some(to)) = (filter.from_date, filter.to_date) {
        if from > to {
            return Err(ApiError::Validation(
                "from_date must not be after to_date".to_string(),
            ));
        }
    }

    let reports = ReportRepository::new(state.pool.clone());
    let rows = reports
        .events_report(filter.from_date, filter.to_date, filter.organizer_id)
        .await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/admin/reports/monthly - events held and attendance recorded
/// per month of a year.
pub async fn monthly_summary(
    State(state): State<AppState>,
    auth: UserAuth,
    Query(query): Query<MonthlySummaryQuery>,
) -> Result<Json<Vec<MonthlySummaryRow>>, ApiError> {
    auth.require_reports_access()?;

    let year = query.year.unwrap_or_else(|| Utc::now().year());
    if !(2000..=2100).contains(&year) {
        return Err(ApiError::Validation("year must be 2000-2100".to_string()));
    }

    let reports = ReportRepository::new(state.pool.clone());
    let rows = reports.monthly_summary(year).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/admin/reports/events/:event_id/attendance - per-attendee
/// details for one event.
pub async fn attendance_details(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceDetailRow>>, ApiError> {
    auth.require_reports_access()?;

    let events = EventRepository::new(state.pool.clone());
    if events.find_by_id(event_id).await?.is_none() {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    let reports = ReportRepository::new(state.pool.clone());
    let rows = reports.attendance_details(event_id).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
