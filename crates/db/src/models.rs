use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use residency_core::models::{
    appointment::Appointment,
    process::{Process, ProcessStatus},
    time_slot::TimeSlot,
    unit::{Address, GeoLocation, ServiceUnit},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbServiceUnit {
    pub id: Uuid,
    pub name: String,
    pub street: String,
    pub street_number: String,
    pub city: String,
    pub city_key: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub staff: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbServiceUnit> for ServiceUnit {
    type Error = eyre::Report;

    fn try_from(row: DbServiceUnit) -> Result<Self, Self::Error> {
        let location = GeoLocation::new(row.latitude, row.longitude)
            .map_err(|e| eyre!("Unit {} has an invalid location: {}", row.id, e))?;

        Ok(ServiceUnit {
            id: row.id,
            name: row.name,
            address: Address {
                street: row.street,
                number: row.street_number,
                city: row.city,
                postal_code: row.postal_code,
            },
            location,
            staff: row.staff.into_iter().collect(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub user_id: String,
    pub process_id: Uuid,
    pub unit_id: Uuid,
    pub date: NaiveDate,
    pub slot: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl From<DbAppointment> for Appointment {
    fn from(row: DbAppointment) -> Self {
        Appointment {
            id: row.id,
            user_id: row.user_id,
            process_id: row.process_id,
            unit_id: row.unit_id,
            date: row.date,
            slot: TimeSlot::from(row.slot),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProcess {
    pub id: Uuid,
    pub user_id: String,
    pub service_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbProcess> for Process {
    type Error = eyre::Report;

    fn try_from(row: DbProcess) -> Result<Self, Self::Error> {
        let status = ProcessStatus::parse(&row.status)
            .ok_or_else(|| eyre!("Process {} has unknown status '{}'", row.id, row.status))?;

        Ok(Process {
            id: row.id,
            user_id: row.user_id,
            service_code: row.service_code,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
