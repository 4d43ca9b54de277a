//! PostgreSQL implementation of the engine's collaborator ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use residency_core::{
    errors::{StoreError, StoreResult},
    models::{
        appointment::{Appointment, CreateOutcome, NewAppointment},
        city::CityKey,
        process::Process,
        unit::ServiceUnit,
    },
    ports::{AppointmentStore, ProcessStore, UnitDirectory},
};
use uuid::Uuid;

use crate::{DbPool, repositories};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Connection-level failures are transient; everything else is a backend error.
fn classify(report: eyre::Report) -> StoreError {
    let transient = matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_))
    );

    if transient {
        StoreError::Unavailable(report.to_string())
    } else {
        StoreError::Backend(report)
    }
}

#[async_trait]
impl UnitDirectory for PgStore {
    async fn units_in_city(&self, city: &CityKey) -> StoreResult<Vec<ServiceUnit>> {
        let rows = repositories::unit::get_units_by_city_key(&self.pool, city.as_str())
            .await
            .map_err(classify)?;

        rows.into_iter()
            .map(ServiceUnit::try_from)
            .collect::<eyre::Result<Vec<_>>>()
            .map_err(StoreError::Backend)
    }

    async fn unit_by_id(&self, id: Uuid) -> StoreResult<Option<ServiceUnit>> {
        repositories::unit::get_unit_by_id(&self.pool, id)
            .await
            .map_err(classify)?
            .map(ServiceUnit::try_from)
            .transpose()
            .map_err(StoreError::Backend)
    }

    async fn staff_count(&self, id: Uuid) -> StoreResult<usize> {
        repositories::unit::get_staff_count(&self.pool, id)
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn create(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let row = repositories::appointment::create_appointment(&self.pool, &appointment)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn create_if_available(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<CreateOutcome> {
        let outcome = repositories::appointment::create_appointment_if_available(
            &self.pool,
            &appointment,
            capacity,
        )
        .await
        .map_err(classify)?;
        Ok(outcome.map(Appointment::from))
    }

    async fn find_by_unit_and_date(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Vec<Appointment>> {
        let rows =
            repositories::appointment::get_appointments_by_unit_and_date(&self.pool, unit_id, date)
                .await
                .map_err(classify)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn find_by_process(&self, process_id: Uuid) -> StoreResult<Option<Appointment>> {
        let row = repositories::appointment::get_appointment_by_process(&self.pool, process_id)
            .await
            .map_err(classify)?;
        Ok(row.map(Appointment::from))
    }

    async fn exists_for_process(&self, process_id: Uuid) -> StoreResult<bool> {
        repositories::appointment::appointment_exists_for_process(&self.pool, process_id)
            .await
            .map_err(classify)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        repositories::appointment::delete_appointment(&self.pool, id)
            .await
            .map_err(classify)
    }

    async fn delete_all_for_process(&self, process_id: Uuid) -> StoreResult<usize> {
        repositories::appointment::delete_appointments_by_process(&self.pool, process_id)
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl ProcessStore for PgStore {
    async fn process_by_id(&self, id: Uuid) -> StoreResult<Option<Process>> {
        repositories::process::get_process_by_id(&self.pool, id)
            .await
            .map_err(classify)?
            .map(Process::try_from)
            .transpose()
            .map_err(StoreError::Backend)
    }
}
