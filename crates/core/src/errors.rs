use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::time_slot::TimeSlot;

/// Failure reported by a storage or directory collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend could not be reached, or did not answer in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store error: {0}")]
    Backend(eyre::Report),
}

// eyre::Report is not a std::error::Error, so no #[from]
impl From<eyre::Report> for StoreError {
    fn from(report: eyre::Report) -> Self {
        StoreError::Backend(report)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Date {0} is not bookable")]
    InvalidDate(NaiveDate),

    #[error("Process {0} already has an appointment")]
    ProcessAlreadyBooked(Uuid),

    #[error("Slot {slot} on {date} is no longer available")]
    SlotUnavailable { date: NaiveDate, slot: TimeSlot },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(eyre::Report),

    #[error("Temporarily unavailable: {0}")]
    Transient(String),
}

impl BookingError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidDate(_) => "invalid_date",
            BookingError::ProcessAlreadyBooked(_) => "process_already_booked",
            BookingError::SlotUnavailable { .. } => "slot_unavailable",
            BookingError::NotFound(_) => "not_found",
            BookingError::Validation(_) => "validation",
            BookingError::PersistenceFailure(_) => "persistence_failure",
            BookingError::Transient(_) => "transient",
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::Transient(_) | BookingError::PersistenceFailure(_)
        )
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => BookingError::Transient(msg),
            StoreError::Backend(report) => BookingError::PersistenceFailure(report),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
