use cacheside_domain::config::DatabaseConfig;
use cacheside_infrastructure::database::{create_pool, run_migrations};
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!("Initializing database: {}", cfg.url);

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize database pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    if cfg.run_migrations {
        run_migrations(&pool, &cfg.migrations_path)
            .await
            .map_err(|e| {
                error!("Failed to run migrations from {}: {}", cfg.migrations_path, e);
                anyhow::anyhow!(e)
            })?;
    }

    info!(
        max_connections = cfg.max_connections,
        migrations = cfg.run_migrations,
        "Database initialized successfully"
    );

    Ok(pool)
}
