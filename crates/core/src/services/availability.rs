//! # City-wide availability
//!
//! Fans the capacity calculator out over every unit of a city. The map
//! operation waits for every unit; the boolean check returns on the first
//! unit that reports a free slot and drops the remaining queries.
//!
//! Neither operation fails: a directory outage yields "no availability" and a
//! per-unit store outage yields "no slots" for that unit only.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join_all;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::calendar::CalendarFilter;
use crate::models::{
    availability::{AvailabilityMap, UnitAvailability},
    city::CityKey,
    unit::ServiceUnit,
};
use crate::ports::UnitDirectory;
use crate::services::{CapacityCalculator, DEFAULT_STORE_TIMEOUT, bounded};

pub struct AvailabilityResolver {
    units: Arc<dyn UnitDirectory>,
    calculator: CapacityCalculator,
    calendar: Arc<CalendarFilter>,
    timeout: Duration,
}

impl AvailabilityResolver {
    pub fn new(
        units: Arc<dyn UnitDirectory>,
        calculator: CapacityCalculator,
        calendar: Arc<CalendarFilter>,
    ) -> Self {
        Self {
            units,
            calculator,
            calendar,
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Free slots of every unit in `city` on `date`, waiting for all units.
    pub async fn availability_map(&self, city: &CityKey, date: NaiveDate) -> AvailabilityMap {
        let Some(units) = self.bookable_units(city, date).await else {
            return AvailabilityMap::empty(date);
        };

        let entries = join_all(units.into_iter().map(|unit| async move {
            let slots = self.calculator.available_slots(&unit, date).await;
            UnitAvailability { unit, slots }
        }))
        .await;

        debug!(
            "Availability for '{}' on {}: {} units, {} with free slots",
            city,
            date,
            entries.len(),
            entries.iter().filter(|e| !e.slots.is_empty()).count()
        );

        AvailabilityMap::new(date, entries)
    }

    /// True as soon as any unit in `city` has a free slot on `date`.
    pub async fn is_city_available_on_date(&self, city: &CityKey, date: NaiveDate) -> bool {
        let Some(units) = self.bookable_units(city, date).await else {
            return false;
        };

        let mut pending: FuturesUnordered<_> = units
            .iter()
            .map(|unit| self.calculator.available_slots(unit, date))
            .collect();

        while let Some(slots) = pending.next().await {
            if !slots.is_empty() {
                return true;
            }
        }

        false
    }

    /// Units of `city`, or `None` when nothing there can be booked on `date`.
    async fn bookable_units(&self, city: &CityKey, date: NaiveDate) -> Option<Vec<ServiceUnit>> {
        if !self.calendar.is_bookable(date) {
            debug!("{} is not bookable, skipping unit lookup", date);
            return None;
        }

        let units = match bounded(self.timeout, "units_in_city", self.units.units_in_city(city)).await
        {
            Ok(units) => units,
            Err(e) => {
                warn!("Unit lookup for '{}' failed, reporting no availability: {}", city, e);
                return None;
            }
        };

        if units.is_empty() {
            debug!("No units registered in '{}'", city);
            return None;
        }

        Some(units)
    }
}
