use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use switchyard_domain::config::DatabaseConfig;

const MIGRATIONS_DIR: &str = "./migrations";

pub async fn create_pool(database_url: &str, cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect_with(options)
        .await?;

    let migrator = Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    migrator.run(&pool).await?;

    Ok(pool)
}
