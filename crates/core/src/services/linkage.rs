use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::{
    appointment::Appointment,
    process::{Process, ProcessStatus},
};
use crate::ports::{AppointmentStore, ProcessStore};
use crate::services::{DEFAULT_STORE_TIMEOUT, bounded};

/// Ties appointments to the administrative process they belong to.
///
/// Process state is read-only here; the process workflow owns it and calls
/// [`ProcessLinkage::release`] when a process is cancelled or refused.
pub struct ProcessLinkage {
    processes: Arc<dyn ProcessStore>,
    appointments: Arc<dyn AppointmentStore>,
    timeout: Duration,
}

impl ProcessLinkage {
    pub fn new(processes: Arc<dyn ProcessStore>, appointments: Arc<dyn AppointmentStore>) -> Self {
        Self {
            processes,
            appointments,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn process(&self, process_id: Uuid) -> BookingResult<Process> {
        bounded(
            self.timeout,
            "process_by_id",
            self.processes.process_by_id(process_id),
        )
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Process with ID {} not found", process_id)))
    }

    pub async fn status(&self, process_id: Uuid) -> BookingResult<ProcessStatus> {
        Ok(self.process(process_id).await?.status)
    }

    /// An approved process without an appointment may be scheduled.
    pub async fn is_schedulable(&self, process_id: Uuid) -> BookingResult<bool> {
        let process = self.process(process_id).await?;
        self.schedulable(&process).await
    }

    /// Same rule as [`is_schedulable`](Self::is_schedulable) for a process the
    /// caller already holds; only the appointment link is looked up.
    pub async fn schedulable(&self, process: &Process) -> BookingResult<bool> {
        if process.status != ProcessStatus::Approved {
            return Ok(false);
        }

        let linked = bounded(
            self.timeout,
            "exists_for_process",
            self.appointments.exists_for_process(process.id),
        )
        .await?;

        Ok(!linked)
    }

    pub async fn appointment_for(&self, process_id: Uuid) -> BookingResult<Option<Appointment>> {
        Ok(bounded(
            self.timeout,
            "find_by_process",
            self.appointments.find_by_process(process_id),
        )
        .await?)
    }

    /// Frees every appointment of a closed process.
    pub async fn release(&self, process_id: Uuid) -> BookingResult<usize> {
        let deleted = bounded(
            self.timeout,
            "delete_all_for_process",
            self.appointments.delete_all_for_process(process_id),
        )
        .await?;

        info!("Released {} appointments of process {}", deleted, process_id);
        Ok(deleted)
    }
}
