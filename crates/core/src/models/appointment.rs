use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::time_slot::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub process_id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// An appointment not yet persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: String,
    pub process_id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl NewAppointment {
    pub fn with_id(self, id: Uuid) -> Appointment {
        Appointment {
            id,
            user_id: self.user_id,
            process_id: self.process_id,
            unit_id: self.unit_id,
            date: self.date,
            slot: self.slot,
        }
    }
}

/// Result of an atomic conditional insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T = Appointment> {
    Created(T),
    /// The (unit, date, slot) already holds `capacity` appointments.
    SlotFull,
    /// The process is already linked to an appointment.
    ProcessAlreadyBooked,
}

impl<T> CreateOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CreateOutcome<U> {
        match self {
            CreateOutcome::Created(value) => CreateOutcome::Created(f(value)),
            CreateOutcome::SlotFull => CreateOutcome::SlotFull,
            CreateOutcome::ProcessAlreadyBooked => CreateOutcome::ProcessAlreadyBooked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub user_id: String,
    pub process_id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl From<BookingRequest> for NewAppointment {
    fn from(request: BookingRequest) -> Self {
        NewAppointment {
            user_id: request.user_id,
            process_id: request.process_id,
            unit_id: request.unit_id,
            date: request.date,
            slot: request.slot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAllResponse {
    pub process_id: Uuid,
    pub deleted: usize,
}
