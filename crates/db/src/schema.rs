use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create service_units table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service_units (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            street VARCHAR(255) NOT NULL,
            street_number VARCHAR(32) NOT NULL,
            city VARCHAR(255) NOT NULL,
            city_key VARCHAR(255) NOT NULL,
            postal_code VARCHAR(32) NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            staff TEXT[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_latitude CHECK (latitude BETWEEN -90 AND 90),
            CONSTRAINT valid_longitude CHECK (longitude BETWEEN -180 AND 180)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create processes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS processes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL,
            service_code VARCHAR(64) NOT NULL,
            status VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('IN_ANALYSIS', 'APPROVED', 'REFUSED'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table; one appointment per process
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id VARCHAR(255) NOT NULL,
            process_id UUID NOT NULL UNIQUE,
            unit_id UUID NOT NULL REFERENCES service_units(id),
            date DATE NOT NULL,
            slot TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_service_units_city_key ON service_units(city_key)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_unit_date ON appointments(unit_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_unit_date_slot ON appointments(unit_id, date, slot)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
