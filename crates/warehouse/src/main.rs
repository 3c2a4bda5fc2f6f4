use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::init_logger,
};
use tracing::{info, warn};
use warehouse::{
    config::myconfig::Config, di::StorageBackend, handler::AppRouter, state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    init_logger("warehouse", is_dev, is_enable_file);

    let config = Config::init().context("Failed to load configuration")?;

    info!("🚀 Starting warehouse service initialization...");

    let backend = match &config.database_url {
        Some(url) => {
            let pool = ConnectionManager::new_pool(url, config.db_max_conn)
                .await
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            StorageBackend::Postgres(pool)
        }
        None => {
            warn!("⚠️ DATABASE_URL not set, products are kept in memory only");
            StorageBackend::in_memory()
        }
    };

    info!("🗄️ Using {backend:?} storage");

    let state = AppState::new(backend);

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("👋 Warehouse service stopped");

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("🔄 Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Database migrations completed");
    Ok(())
}
