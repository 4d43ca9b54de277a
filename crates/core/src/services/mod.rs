//! The availability & booking engine.

pub mod availability;
pub mod booking;
pub mod capacity;
pub mod linkage;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::calendar::{CalendarFilter, Clock, SlotGrid};
use crate::errors::{StoreError, StoreResult};
use crate::ports::{AppointmentStore, ProcessStore, UnitDirectory};

pub use availability::AvailabilityResolver;
pub use booking::BookingService;
pub use capacity::CapacityCalculator;
pub use linkage::ProcessLinkage;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Awaits a collaborator call, turning an elapsed `limit` into
/// [`StoreError::Unavailable`].
pub(crate) async fn bounded<T, F>(limit: Duration, operation: &str, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Unavailable(format!(
            "{} timed out after {}ms",
            operation,
            limit.as_millis()
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub grid: SlotGrid,
    pub holidays: Vec<NaiveDate>,
    pub store_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid: SlotGrid::default(),
            holidays: Vec::new(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// All engine services wired over one set of collaborators.
#[derive(Clone)]
pub struct Engine {
    pub availability: Arc<AvailabilityResolver>,
    pub booking: Arc<BookingService>,
    pub linkage: Arc<ProcessLinkage>,
    grid: Arc<SlotGrid>,
}

impl Engine {
    pub fn new(
        units: Arc<dyn UnitDirectory>,
        appointments: Arc<dyn AppointmentStore>,
        processes: Arc<dyn ProcessStore>,
        clock: impl Clock + 'static,
        settings: EngineSettings,
    ) -> Self {
        let grid = Arc::new(settings.grid);
        let calendar = Arc::new(CalendarFilter::new(clock).with_holidays(settings.holidays));
        let calculator = CapacityCalculator::new(appointments.clone(), grid.clone())
            .with_timeout(settings.store_timeout);

        let availability = AvailabilityResolver::new(units.clone(), calculator.clone(), calendar.clone())
            .with_timeout(settings.store_timeout);
        let booking = BookingService::new(units, appointments.clone(), calculator, calendar)
            .with_timeout(settings.store_timeout);
        let linkage = ProcessLinkage::new(processes, appointments).with_timeout(settings.store_timeout);

        Self {
            availability: Arc::new(availability),
            booking: Arc::new(booking),
            linkage: Arc::new(linkage),
            grid,
        }
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }
}
