//! # Process Handlers
//!
//! Queries and actions on the link between an administrative process and its
//! appointment.

use axum::{
    extract::{Path, State},
    Json,
};
use residency_core::{
    errors::BookingError,
    models::{
        appointment::{Appointment, CancelAllResponse},
        process::SchedulableResponse,
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// The appointment currently linked to a process.
///
/// # Endpoint
///
/// ```text
/// GET /api/processes/:id/appointment
/// ```
///
/// Responds `404` when the process has no appointment.
pub async fn get_process_appointment(
    State(state): State<Arc<ApiState>>,
    Path(process_id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = state
        .engine
        .linkage
        .appointment_for(process_id)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound(format!("No appointment for process {}", process_id))
        })?;

    Ok(Json(appointment))
}

/// Whether the process may book an appointment now.
///
/// # Endpoint
///
/// ```text
/// GET /api/processes/:id/schedulable
/// ```
pub async fn get_process_schedulable(
    State(state): State<Arc<ApiState>>,
    Path(process_id): Path<Uuid>,
) -> Result<Json<SchedulableResponse>, AppError> {
    let linkage = &state.engine.linkage;
    let process = linkage.process(process_id).await?;
    let schedulable = linkage.schedulable(&process).await?;

    Ok(Json(SchedulableResponse {
        process_id,
        status: process.status,
        schedulable,
    }))
}

/// Cancels every appointment of a process.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/processes/:id/appointments
/// ```
pub async fn cancel_process_appointments(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(process_id): Path<Uuid>,
) -> Result<Json<CancelAllResponse>, AppError> {
    let deleted = state.engine.booking.cancel_all_for_process(process_id).await?;
    info!(
        "{} appointment(s) of process {} cancelled by {}",
        deleted,
        process_id,
        user.id()
    );

    Ok(Json(CancelAllResponse { process_id, deleted }))
}
