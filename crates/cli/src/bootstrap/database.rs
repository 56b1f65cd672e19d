use sqlx::SqlitePool;
use switchyard_domain::config::DatabaseConfig;
use switchyard_infrastructure::database::create_pool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    let database_url = format!("sqlite:{}", cfg.path);
    info!("Initializing database: {}", database_url);

    let pool = create_pool(&database_url, cfg).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(max_connections = cfg.max_connections, "Database initialized successfully");
    Ok(pool)
}
