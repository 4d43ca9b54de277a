use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;
use crate::models::city::CityKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    pub postal_code: String,
}

impl Address {
    pub fn city_key(&self) -> CityKey {
        CityKey::new(&self.city)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, BookingError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(BookingError::Validation(format!(
                "Latitude {} is outside [-90, 90]",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(BookingError::Validation(format!(
                "Longitude {} is outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = BookingError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        GeoLocation::new(raw.latitude, raw.longitude)
    }
}

/// A physical office able to host appointments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUnit {
    pub id: Uuid,
    pub name: String,
    pub address: Address,
    pub location: GeoLocation,
    /// Staff identifiers; the roster size is the per-slot capacity.
    pub staff: BTreeSet<String>,
}

impl ServiceUnit {
    /// Number of appointments the unit can hold in one slot.
    pub fn capacity(&self) -> usize {
        self.staff.len()
    }
}
