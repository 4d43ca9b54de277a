//! # Availability Handlers
//!
//! Read-only endpoints over the slot grid and city availability. These never
//! fail: a store outage for one unit shows up as that unit having no slots,
//! and a date outside the bookable calendar yields an empty answer.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use residency_core::models::{
    availability::{AvailabilityMap, CityAvailabilityResponse},
    city::CityKey,
    time_slot::TimeSlot,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::ApiState;

/// Query parameters shared by the availability endpoints
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// City name as typed by the user; case and accents are ignored
    pub city: String,

    /// Day of interest, `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Drop units without any free slot
    #[serde(default)]
    pub only_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<TimeSlot>,
}

/// Lists the configured slot grid.
///
/// # Endpoint
///
/// ```text
/// GET /api/slots
/// ```
pub async fn get_slots(State(state): State<Arc<ApiState>>) -> Json<SlotsResponse> {
    Json(SlotsResponse {
        slots: state.engine.grid().slots().to_vec(),
    })
}

/// Free slots of every unit in a city on a date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?city=Porto&date=2026-10-21&only_available=true
/// ```
///
/// Units are ordered by name. A unit whose appointments could not be read is
/// listed with no slots.
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<AvailabilityMap> {
    let city = CityKey::new(&query.city);
    debug!("Availability requested for {} on {}", city.as_str(), query.date);

    let map = state.engine.availability.availability_map(&city, query.date).await;
    let map = if query.only_available {
        map.only_available()
    } else {
        map
    };

    Json(map)
}

/// Whether any unit in the city has at least one free slot on the date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/check?city=Porto&date=2026-10-21
/// ```
pub async fn check_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<CityAvailabilityResponse> {
    let city = CityKey::new(&query.city);
    let available = state
        .engine
        .availability
        .is_city_available_on_date(&city, query.date)
        .await;

    Json(CityAvailabilityResponse {
        city: city.as_str().to_string(),
        date: query.date,
        available,
    })
}
