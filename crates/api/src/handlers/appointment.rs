//! # Appointment Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use residency_core::{
    models::appointment::{Appointment, BookingRequest},
    ports::AuthProvider,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books a slot at a unit for a process.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// x-user-id: <user>
///
/// {"process_id": "...", "unit_id": "...", "date": "2026-10-21", "slot": "09:30"}
/// ```
///
/// The owner of the appointment is always the authenticated caller; a
/// `user_id` in the body is ignored.
///
/// # Errors
///
/// * `400` - Date not bookable, or slot not on the grid
/// * `404` - Unknown unit
/// * `409` - Process already booked, or slot full
/// * `500` / `503` - Storage failure or timeout
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(mut request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    request.user_id = user.current_user_id().ok_or(AppError::Unauthenticated)?;

    let appointment = state.engine.booking.book(request).await?;
    info!(
        "Booked appointment {} for process {} at {} {}",
        appointment.id, appointment.process_id, appointment.date, appointment.slot
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Cancels one appointment, freeing its slot.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/appointments/:id
/// ```
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.engine.booking.cancel(id).await?;
    info!("Appointment {} cancelled by {}", id, user.id());

    Ok(StatusCode::NO_CONTENT)
}
