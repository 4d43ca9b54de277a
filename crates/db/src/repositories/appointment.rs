use crate::models::DbAppointment;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use residency_core::models::appointment::{CreateOutcome, NewAppointment};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, user_id, process_id, unit_id, date, slot, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, process_id, unit_id, date, slot, created_at
        "#,
    )
    .bind(id)
    .bind(&appointment.user_id)
    .bind(appointment.process_id)
    .bind(appointment.unit_id)
    .bind(appointment.date)
    .bind(appointment.slot.time())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Inserts the appointment only if the slot is under `capacity` and the
/// process has none yet.
///
/// Writers of the same (unit, date, slot) are serialized by a transaction
/// scoped advisory lock, so the count and the insert cannot interleave with
/// another booking of that slot. The unique index on `process_id` settles
/// races between bookings of the same process for different slots.
pub async fn create_appointment_if_available(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment,
    capacity: usize,
) -> Result<CreateOutcome<DbAppointment>> {
    let mut tx = pool.begin().await?;

    let lock_key = format!(
        "{}:{}:{}",
        appointment.unit_id, appointment.date, appointment.slot
    );
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(&lock_key)
        .execute(&mut *tx)
        .await?;

    let process_taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM appointments WHERE process_id = $1)",
    )
    .bind(appointment.process_id)
    .fetch_one(&mut *tx)
    .await?;
    if process_taken {
        tx.rollback().await?;
        return Ok(CreateOutcome::ProcessAlreadyBooked);
    }

    let booked = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM appointments
        WHERE unit_id = $1 AND date = $2 AND slot = $3
        "#,
    )
    .bind(appointment.unit_id)
    .bind(appointment.date)
    .bind(appointment.slot.time())
    .fetch_one(&mut *tx)
    .await?;
    if booked.max(0) as usize >= capacity {
        tx.rollback().await?;
        return Ok(CreateOutcome::SlotFull);
    }

    let inserted = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, user_id, process_id, unit_id, date, slot, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, process_id, unit_id, date, slot, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&appointment.user_id)
    .bind(appointment.process_id)
    .bind(appointment.unit_id)
    .bind(appointment.date)
    .bind(appointment.slot.time())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(row) => {
            tx.commit().await?;
            Ok(CreateOutcome::Created(row))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            tx.rollback().await?;
            Ok(CreateOutcome::ProcessAlreadyBooked)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_appointments_by_unit_and_date(
    pool: &Pool<Postgres>,
    unit_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, process_id, unit_id, date, slot, created_at
        FROM appointments
        WHERE unit_id = $1 AND date = $2
        ORDER BY slot ASC
        "#,
    )
    .bind(unit_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointment_by_process(
    pool: &Pool<Postgres>,
    process_id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, user_id, process_id, unit_id, date, slot, created_at
        FROM appointments
        WHERE process_id = $1
        "#,
    )
    .bind(process_id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn appointment_exists_for_process(
    pool: &Pool<Postgres>,
    process_id: Uuid,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM appointments WHERE process_id = $1)",
    )
    .bind(process_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_appointments_by_process(
    pool: &Pool<Postgres>,
    process_id: Uuid,
) -> Result<usize> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE process_id = $1
        "#,
    )
    .bind(process_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() as usize)
}
