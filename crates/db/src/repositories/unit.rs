use crate::models::DbServiceUnit;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_units_by_city_key(
    pool: &Pool<Postgres>,
    city_key: &str,
) -> Result<Vec<DbServiceUnit>> {
    tracing::debug!("Getting units by city key: {}", city_key);

    let units = sqlx::query_as::<_, DbServiceUnit>(
        r#"
        SELECT id, name, street, street_number, city, city_key, postal_code,
               latitude, longitude, staff, created_at
        FROM service_units
        WHERE city_key = $1
        ORDER BY name ASC
        "#,
    )
    .bind(city_key)
    .fetch_all(pool)
    .await?;

    Ok(units)
}

pub async fn get_unit_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbServiceUnit>> {
    let unit = sqlx::query_as::<_, DbServiceUnit>(
        r#"
        SELECT id, name, street, street_number, city, city_key, postal_code,
               latitude, longitude, staff, created_at
        FROM service_units
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if unit.is_none() {
        tracing::debug!("Unit not found: id={}", id);
    }

    Ok(unit)
}

pub async fn get_staff_count(pool: &Pool<Postgres>, id: Uuid) -> Result<usize> {
    let count = sqlx::query_scalar::<_, Option<i32>>(
        r#"
        SELECT cardinality(staff)
        FROM service_units
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .flatten()
    .unwrap_or(0);

    Ok(count.max(0) as usize)
}
