use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    // An in-memory sqlite database lives exactly as long as its connection.
    if !cfg.url.contains(":memory:") {
        opt.idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }
    let db = Database::connect(opt).await?;
    info!(
        sqlite = cfg.is_sqlite(),
        max_connections = cfg.max_connections,
        "database_connected"
    );
    Ok(db)
}

/// Connects and applies every pending migration.
pub async fn connect_and_migrate(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    use migration::MigratorTrait;
    let db = connect_with_config(cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
