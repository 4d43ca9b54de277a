use std::error::Error;

use chrono::NaiveDate;
use residency_core::errors::{BookingError, BookingResult, StoreError};
use residency_core::models::time_slot::TimeSlot;
use uuid::Uuid;

#[test]
fn test_booking_error_display() {
    let date = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
    let process_id = Uuid::nil();

    let invalid_date = BookingError::InvalidDate(date);
    let already_booked = BookingError::ProcessAlreadyBooked(process_id);
    let unavailable = BookingError::SlotUnavailable {
        date,
        slot: TimeSlot::new(9, 30).unwrap(),
    };
    let not_found = BookingError::NotFound("Unit not found".to_string());
    let persistence = BookingError::PersistenceFailure(eyre::eyre!("insert failed"));
    let transient = BookingError::Transient("timed out".to_string());

    assert_eq!(invalid_date.to_string(), "Date 2026-10-24 is not bookable");
    assert_eq!(
        already_booked.to_string(),
        "Process 00000000-0000-0000-0000-000000000000 already has an appointment"
    );
    assert_eq!(
        unavailable.to_string(),
        "Slot 09:30 on 2026-10-24 is no longer available"
    );
    assert_eq!(not_found.to_string(), "Resource not found: Unit not found");
    assert!(persistence.to_string().contains("Persistence failure:"));
    assert_eq!(transient.to_string(), "Temporarily unavailable: timed out");
}

#[test]
fn test_store_error_conversion() {
    let transient: BookingError = StoreError::Unavailable("no route to host".to_string()).into();
    let persistence: BookingError = StoreError::Backend(eyre::eyre!("constraint violated")).into();

    assert_eq!(transient.kind(), "transient");
    assert_eq!(persistence.kind(), "persistence_failure");
    assert!(persistence.source().is_some());
}

#[test]
fn test_retryable_kinds() {
    assert!(BookingError::Transient("x".to_string()).is_retryable());
    assert!(BookingError::PersistenceFailure(eyre::eyre!("x")).is_retryable());
    assert!(!BookingError::ProcessAlreadyBooked(Uuid::nil()).is_retryable());
    assert!(!BookingError::Validation("x".to_string()).is_retryable());
}

#[test]
fn test_booking_result() {
    let result: BookingResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: BookingResult<i32> = Err(BookingError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
