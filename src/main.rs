use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use residency_api::{config::ApiConfig, ApiState};
use residency_core::{
    calendar::SystemClock,
    ports::{AppointmentStore, ProcessStore, UnitDirectory},
    services::Engine,
};
use residency_db::{create_pool, schema::initialize_database, MemoryStore, PgStore};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

type Stores = (
    Arc<dyn UnitDirectory>,
    Arc<dyn AppointmentStore>,
    Arc<dyn ProcessStore>,
);

async fn open_stores(config: &ApiConfig) -> Result<Stores> {
    if let Some(database_url) = &config.database_url {
        info!("Using PostgreSQL store");
        let db_pool = create_pool(database_url).await?;
        initialize_database(&db_pool).await?;

        let store = Arc::new(PgStore::new(db_pool));
        return Ok((store.clone(), store.clone(), store));
    }

    let store = match &config.seed_file {
        Some(path) => MemoryStore::load_seed(path)?,
        None => {
            warn!("DATABASE_URL not set and no SEED_FILE given; starting with an empty in-memory store");
            MemoryStore::new()
        }
    };
    let store = Arc::new(store);
    Ok((store.clone(), store.clone(), store))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting residency appointment service");

    let (units, appointments, processes) = open_stores(&config).await?;
    let engine = Engine::new(
        units,
        appointments,
        processes,
        SystemClock,
        config.engine_settings()?,
    );

    // Start API server
    residency_api::start_server(config, ApiState::new(engine)).await?;

    Ok(())
}
