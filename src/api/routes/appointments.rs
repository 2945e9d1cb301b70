//! Appointment Routes
//!
//! - GET /api/appointments - List appointments in booking order (admin)
//! - POST /api/appointments - Submit a booking request (public)
//! - PATCH /api/appointments/:id/status - Change status (admin)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateAppointmentRequest, UpdateStatusRequest};
use crate::api::error::ApiResult;
use crate::api::extract::{AdminSession, ApiJson};
use crate::api::state::AppState;
use crate::storage::{Appointment, AppointmentStatus};

/// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    _admin: AdminSession,
) -> ApiResult<Json<Vec<Appointment>>> {
    let appointments = state.store.list_appointments()?;
    Ok(Json(appointments))
}

/// POST /api/appointments
///
/// Required fields are re-validated here; the booking form is not trusted.
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateAppointmentRequest>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.store.create_appointment(req.into())?;

    tracing::info!(
        appointment_id = %appointment.id,
        service = %appointment.service,
        date = %appointment.date,
        "Appointment requested"
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// PATCH /api/appointments/:id/status
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> ApiResult<Json<Appointment>> {
    let status: AppointmentStatus = req.status.parse()?;
    let appointment = state.store.update_appointment_status(&id, status)?;

    tracing::info!(
        appointment_id = %id,
        status = %status,
        admin = %session.username,
        "Appointment status updated"
    );

    Ok(Json(appointment))
}
