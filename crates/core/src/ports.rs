//! Collaborator interfaces consumed by the engine.
//!
//! Implementations live in `residency-db` (PostgreSQL and in-memory); the
//! engine only ever sees these traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::StoreResult;
use crate::models::{
    appointment::{Appointment, CreateOutcome, NewAppointment},
    city::CityKey,
    process::Process,
    unit::ServiceUnit,
};

/// Lookup of service units.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitDirectory: Send + Sync {
    async fn units_in_city(&self, city: &CityKey) -> StoreResult<Vec<ServiceUnit>>;

    async fn unit_by_id(&self, id: Uuid) -> StoreResult<Option<ServiceUnit>>;

    /// Roster size of a unit; an unknown unit has no capacity.
    async fn staff_count(&self, id: Uuid) -> StoreResult<usize> {
        Ok(self
            .unit_by_id(id)
            .await?
            .map(|unit| unit.capacity())
            .unwrap_or(0))
    }
}

/// Persistence of appointment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Unconditional insert.
    async fn create(&self, appointment: NewAppointment) -> StoreResult<Appointment>;

    /// Inserts only if the process has no appointment yet and fewer than
    /// `capacity` appointments share the (unit, date, slot). The check and the
    /// write are a single atomic step.
    async fn create_if_available(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<CreateOutcome>;

    async fn find_by_unit_and_date(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Vec<Appointment>>;

    async fn find_by_process(&self, process_id: Uuid) -> StoreResult<Option<Appointment>>;

    async fn exists_for_process(&self, process_id: Uuid) -> StoreResult<bool>;

    /// Returns false when no appointment had that id.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Deletes every appointment of the process, returning how many went.
    /// Need not be atomic: on failure, appointments already deleted stay deleted.
    async fn delete_all_for_process(&self, process_id: Uuid) -> StoreResult<usize>;
}

/// Read access to administrative processes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessStore: Send + Sync {
    async fn process_by_id(&self, id: Uuid) -> StoreResult<Option<Process>>;
}

/// Identity of the caller on whose behalf a booking is made.
#[cfg_attr(test, mockall::automock)]
pub trait AuthProvider: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}
