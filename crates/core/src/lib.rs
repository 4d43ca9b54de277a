//! # Residency Core
//!
//! Domain types and the availability & booking engine for in-person
//! appointments at residency service units.
//!
//! - **models**: units, appointments, processes, time slots
//! - **calendar**: slot grid and bookable-date filter
//! - **ports**: traits implemented by the storage and identity collaborators
//! - **services**: capacity calculation, city-wide availability, booking and
//!   process linkage

pub mod calendar;
pub mod errors;
pub mod models;
pub mod ports;
pub mod services;
