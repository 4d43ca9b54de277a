//! In-process implementation of the collaborator ports.
//!
//! Backs the server when no `DATABASE_URL` is configured and the engine's
//! integration tests. Conditional inserts hold the write lock across the
//! check and the insert, giving the same guarantee as the PostgreSQL store.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use residency_core::{
    errors::StoreResult,
    models::{
        appointment::{Appointment, CreateOutcome, NewAppointment},
        city::CityKey,
        process::Process,
        unit::ServiceUnit,
    },
    ports::{AppointmentStore, ProcessStore, UnitDirectory},
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Default)]
struct State {
    units: HashMap<Uuid, ServiceUnit>,
    processes: HashMap<Uuid, Process>,
    appointments: HashMap<Uuid, Appointment>,
}

impl State {
    /// Appointments sharing the (unit, date, slot) of `appointment`.
    fn booked(&self, appointment: &NewAppointment) -> usize {
        self.appointments
            .values()
            .filter(|a| {
                a.unit_id == appointment.unit_id
                    && a.date == appointment.date
                    && a.slot == appointment.slot
            })
            .count()
    }

    fn has_process(&self, process_id: Uuid) -> bool {
        self.appointments
            .values()
            .any(|a| a.process_id == process_id)
    }
}

/// Units and processes to preload into a [`MemoryStore`].
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub units: Vec<ServiceUnit>,
    #[serde(default)]
    pub processes: Vec<Process>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let state = State {
            units: seed.units.into_iter().map(|u| (u.id, u)).collect(),
            processes: seed.processes.into_iter().map(|p| (p.id, p)).collect(),
            appointments: HashMap::new(),
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Loads a JSON [`Seed`] file.
    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Seed = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Invalid seed file {}", path.display()))?;

        info!(
            "Loaded {} units and {} processes from {}",
            seed.units.len(),
            seed.processes.len(),
            path.display()
        );
        Ok(Self::from_seed(seed))
    }

    pub async fn insert_unit(&self, unit: ServiceUnit) {
        self.state.write().await.units.insert(unit.id, unit);
    }

    pub async fn insert_process(&self, process: Process) {
        self.state.write().await.processes.insert(process.id, process);
    }

    pub async fn appointment_count(&self) -> usize {
        self.state.read().await.appointments.len()
    }
}

#[async_trait]
impl UnitDirectory for MemoryStore {
    async fn units_in_city(&self, city: &CityKey) -> StoreResult<Vec<ServiceUnit>> {
        let state = self.state.read().await;
        let mut units: Vec<ServiceUnit> = state
            .units
            .values()
            .filter(|unit| unit.address.city_key() == *city)
            .cloned()
            .collect();
        units.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(units)
    }

    async fn unit_by_id(&self, id: Uuid) -> StoreResult<Option<ServiceUnit>> {
        Ok(self.state.read().await.units.get(&id).cloned())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn create(&self, appointment: NewAppointment) -> StoreResult<Appointment> {
        let created = appointment.with_id(Uuid::new_v4());
        self.state
            .write()
            .await
            .appointments
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn create_if_available(
        &self,
        appointment: NewAppointment,
        capacity: usize,
    ) -> StoreResult<CreateOutcome> {
        let mut state = self.state.write().await;

        if state.has_process(appointment.process_id) {
            return Ok(CreateOutcome::ProcessAlreadyBooked);
        }
        if state.booked(&appointment) >= capacity {
            debug!(
                "Slot {} on {} at unit {} is full",
                appointment.slot, appointment.date, appointment.unit_id
            );
            return Ok(CreateOutcome::SlotFull);
        }

        let created = appointment.with_id(Uuid::new_v4());
        state.appointments.insert(created.id, created.clone());
        Ok(CreateOutcome::Created(created))
    }

    async fn find_by_unit_and_date(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
    ) -> StoreResult<Vec<Appointment>> {
        let state = self.state.read().await;
        let mut found: Vec<Appointment> = state
            .appointments
            .values()
            .filter(|a| a.unit_id == unit_id && a.date == date)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.slot);
        Ok(found)
    }

    async fn find_by_process(&self, process_id: Uuid) -> StoreResult<Option<Appointment>> {
        Ok(self
            .state
            .read()
            .await
            .appointments
            .values()
            .find(|a| a.process_id == process_id)
            .cloned())
    }

    async fn exists_for_process(&self, process_id: Uuid) -> StoreResult<bool> {
        Ok(self.state.read().await.has_process(process_id))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.state.write().await.appointments.remove(&id).is_some())
    }

    async fn delete_all_for_process(&self, process_id: Uuid) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        let before = state.appointments.len();
        state
            .appointments
            .retain(|_, a| a.process_id != process_id);
        Ok(before - state.appointments.len())
    }
}

#[async_trait]
impl ProcessStore for MemoryStore {
    async fn process_by_id(&self, id: Uuid) -> StoreResult<Option<Process>> {
        Ok(self.state.read().await.processes.get(&id).cloned())
    }
}
