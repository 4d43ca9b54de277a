use crate::models::DbProcess;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_process_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProcess>> {
    let process = sqlx::query_as::<_, DbProcess>(
        r#"
        SELECT id, user_id, service_code, status, created_at, updated_at
        FROM processes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(process)
}
