use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::CalendarFilter;
use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::{Appointment, BookingRequest, CreateOutcome, NewAppointment};
use crate::ports::{AppointmentStore, UnitDirectory};
use crate::services::{CapacityCalculator, DEFAULT_STORE_TIMEOUT, bounded};

/// Re-validates and commits bookings, and releases them again.
///
/// The availability recheck before committing only gives callers an early,
/// precise error. Capacity and the one-appointment-per-process rule are
/// enforced by [`AppointmentStore::create_if_available`], which checks and
/// writes atomically.
pub struct BookingService {
    units: Arc<dyn UnitDirectory>,
    appointments: Arc<dyn AppointmentStore>,
    calculator: CapacityCalculator,
    calendar: Arc<CalendarFilter>,
    timeout: Duration,
}

impl BookingService {
    pub fn new(
        units: Arc<dyn UnitDirectory>,
        appointments: Arc<dyn AppointmentStore>,
        calculator: CapacityCalculator,
        calendar: Arc<CalendarFilter>,
    ) -> Self {
        Self {
            units,
            appointments,
            calculator,
            calendar,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn book(&self, request: BookingRequest) -> BookingResult<Appointment> {
        debug!(
            "Booking request: process={}, unit={}, date={}, slot={}",
            request.process_id, request.unit_id, request.date, request.slot
        );

        if request.user_id.trim().is_empty() {
            return Err(BookingError::Validation("User id is required".to_string()));
        }

        if !self.calendar.is_bookable(request.date) {
            return Err(BookingError::InvalidDate(request.date));
        }

        if !self.calculator.grid().contains(request.slot) {
            return Err(BookingError::Validation(format!(
                "{} is not a bookable slot",
                request.slot
            )));
        }

        let already_booked = bounded(
            self.timeout,
            "exists_for_process",
            self.appointments.exists_for_process(request.process_id),
        )
        .await?;
        if already_booked {
            return Err(BookingError::ProcessAlreadyBooked(request.process_id));
        }

        let unit = bounded(
            self.timeout,
            "unit_by_id",
            self.units.unit_by_id(request.unit_id),
        )
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Unit with ID {} not found", request.unit_id)))?;

        let free = self.calculator.try_available_slots(&unit, request.date).await?;
        if !free.contains(&request.slot) {
            return Err(BookingError::SlotUnavailable {
                date: request.date,
                slot: request.slot,
            });
        }

        let (date, slot, process_id) = (request.date, request.slot, request.process_id);
        let new_appointment = NewAppointment::from(request);

        let outcome = bounded(
            self.timeout,
            "create_if_available",
            self.appointments
                .create_if_available(new_appointment, unit.capacity()),
        )
        .await?;

        match outcome {
            CreateOutcome::Created(appointment) => {
                info!(
                    "Booked appointment {} for process {} at unit {} on {} {}",
                    appointment.id,
                    appointment.process_id,
                    appointment.unit_id,
                    appointment.date,
                    appointment.slot
                );
                Ok(appointment)
            }
            CreateOutcome::SlotFull => {
                warn!(
                    "Slot {} on {} at unit {} filled before commit",
                    slot, date, unit.id
                );
                Err(BookingError::SlotUnavailable { date, slot })
            }
            CreateOutcome::ProcessAlreadyBooked => Err(BookingError::ProcessAlreadyBooked(process_id)),
        }
    }

    pub async fn cancel(&self, appointment_id: Uuid) -> BookingResult<()> {
        let deleted = bounded(
            self.timeout,
            "delete",
            self.appointments.delete(appointment_id),
        )
        .await?;

        if !deleted {
            return Err(BookingError::NotFound(format!(
                "Appointment with ID {} not found",
                appointment_id
            )));
        }

        info!("Cancelled appointment {}", appointment_id);
        Ok(())
    }

    /// Deletes every appointment of a process; returns how many were removed.
    pub async fn cancel_all_for_process(&self, process_id: Uuid) -> BookingResult<usize> {
        let deleted = bounded(
            self.timeout,
            "delete_all_for_process",
            self.appointments.delete_all_for_process(process_id),
        )
        .await?;

        info!("Cancelled {} appointments of process {}", deleted, process_id);
        Ok(deleted)
    }
}
