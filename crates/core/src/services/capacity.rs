use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::calendar::SlotGrid;
use crate::errors::StoreResult;
use crate::models::{appointment::Appointment, time_slot::TimeSlot, unit::ServiceUnit};
use crate::ports::AppointmentStore;
use crate::services::{DEFAULT_STORE_TIMEOUT, bounded};

/// Computes which grid slots of one unit are still under capacity on a date.
#[derive(Clone)]
pub struct CapacityCalculator {
    appointments: Arc<dyn AppointmentStore>,
    grid: Arc<SlotGrid>,
    timeout: Duration,
}

impl CapacityCalculator {
    pub fn new(appointments: Arc<dyn AppointmentStore>, grid: Arc<SlotGrid>) -> Self {
        Self {
            appointments,
            grid,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Free slots in grid order, or the store error that prevented computing them.
    pub async fn try_available_slots(
        &self,
        unit: &ServiceUnit,
        date: NaiveDate,
    ) -> StoreResult<Vec<TimeSlot>> {
        let capacity = unit.capacity();
        if capacity == 0 {
            debug!("Unit {} has no staff, no slots on {}", unit.id, date);
            return Ok(Vec::new());
        }

        let appointments = bounded(
            self.timeout,
            "find_by_unit_and_date",
            self.appointments.find_by_unit_and_date(unit.id, date),
        )
        .await?;

        Ok(free_slots(self.grid.slots(), &appointments, capacity))
    }

    /// Like [`try_available_slots`](Self::try_available_slots), but an
    /// unreachable store counts as "no slots" for this unit.
    pub async fn available_slots(&self, unit: &ServiceUnit, date: NaiveDate) -> Vec<TimeSlot> {
        match self.try_available_slots(unit, date).await {
            Ok(slots) => slots,
            Err(e) => {
                warn!("Treating unit {} as full on {}: {}", unit.id, date, e);
                Vec::new()
            }
        }
    }
}

/// Slots of `grid` whose booked count is below `capacity`, in grid order.
pub fn free_slots(grid: &[TimeSlot], appointments: &[Appointment], capacity: usize) -> Vec<TimeSlot> {
    let mut booked: HashMap<TimeSlot, usize> = HashMap::new();
    for appointment in appointments {
        *booked.entry(appointment.slot).or_default() += 1;
    }

    grid.iter()
        .copied()
        .filter(|slot| booked.get(slot).copied().unwrap_or(0) < capacity)
        .collect()
}
