use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use slotbook_api::config::{ApiConfig, StoreBackend};
use slotbook_db::{
    create_pool, memory::MemorySlotStore, schema::initialize_database, store::PgSlotStore,
    store::SlotStore,
};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(backend = ?config.store_backend, "Selected slot store");

    // Select the slot store backend
    let store: Arc<dyn SlotStore> = match (config.store_backend, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool)
                .await
                .wrap_err("Failed to initialize database schema")?;
            Arc::new(PgSlotStore::new(db_pool))
        }
        (StoreBackend::Postgres, None) => {
            color_eyre::eyre::bail!("DATABASE_URL must be set for the postgres backend")
        }
        (StoreBackend::Memory, _) => Arc::new(MemorySlotStore::new()),
    };

    // Start API server
    slotbook_api::start_server(config, store).await?;

    Ok(())
}
