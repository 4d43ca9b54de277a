use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{time_slot::TimeSlot, unit::ServiceUnit};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitAvailability {
    pub unit: ServiceUnit,
    pub slots: Vec<TimeSlot>,
}

/// Free slots per unit of one city on one date.
///
/// Units without free slots are kept with an empty list; use
/// [`AvailabilityMap::only_available`] to drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityMap {
    pub date: Option<NaiveDate>,
    pub units: Vec<UnitAvailability>,
}

impl AvailabilityMap {
    pub fn new(date: NaiveDate, mut units: Vec<UnitAvailability>) -> Self {
        units.sort_by(|a, b| {
            a.unit
                .name
                .cmp(&b.unit.name)
                .then_with(|| a.unit.id.cmp(&b.unit.id))
        });
        Self {
            date: Some(date),
            units,
        }
    }

    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            units: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn slots_for(&self, unit_id: Uuid) -> Option<&[TimeSlot]> {
        self.units
            .iter()
            .find(|entry| entry.unit.id == unit_id)
            .map(|entry| entry.slots.as_slice())
    }

    pub fn has_any_slot(&self) -> bool {
        self.units.iter().any(|entry| !entry.slots.is_empty())
    }

    pub fn only_available(mut self) -> Self {
        self.units.retain(|entry| !entry.slots.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityAvailabilityResponse {
    pub city: String,
    pub date: NaiveDate,
    pub available: bool,
}
