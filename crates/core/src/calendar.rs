//! Slot grid and bookable-date rules shared by every unit.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Utc, Weekday};

use crate::errors::BookingError;
use crate::models::time_slot::TimeSlot;

/// Ordered, fixed set of bookable instants in a working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    slots: Vec<TimeSlot>,
}

impl SlotGrid {
    /// Builds the grid `first, first + step, ...` up to and including `last`.
    pub fn new(first: TimeSlot, last: TimeSlot, step_minutes: u32) -> Result<Self, BookingError> {
        if step_minutes == 0 {
            return Err(BookingError::Validation(
                "Slot step must be at least one minute".to_string(),
            ));
        }
        if first > last {
            return Err(BookingError::Validation(format!(
                "First slot {} is after last slot {}",
                first, last
            )));
        }

        let slots = (first.minute_of_day()..=last.minute_of_day())
            .step_by(step_minutes as usize)
            .filter_map(|minute| TimeSlot::new(minute / 60, minute % 60))
            .collect();

        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn contains(&self, slot: TimeSlot) -> bool {
        self.slots.binary_search(&slot).is_ok()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotGrid {
    /// 09:00 to 17:00 every 30 minutes.
    fn default() -> Self {
        let slots = (0..17u32)
            .filter_map(|i| TimeSlot::new(9 + i / 2, (i % 2) * 30))
            .collect();
        Self { slots }
    }
}

/// Source of the current date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Rejects weekends, past dates and configured holidays.
pub struct CalendarFilter {
    clock: Box<dyn Clock>,
    holidays: BTreeSet<NaiveDate>,
}

impl CalendarFilter {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            holidays: BTreeSet::new(),
        }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_bookable(&self, date: NaiveDate) -> bool {
        if date < self.clock.today() {
            return false;
        }
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.holidays.contains(&date)
    }
}

impl Default for CalendarFilter {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}
