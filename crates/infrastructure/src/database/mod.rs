use cacheside_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Pool for the product aggregate. Migrations are applied separately by
/// [`run_migrations`].
pub async fn create_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        // WAL mode: readers and writers don't block each other
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        // Avoid SQLITE_BUSY errors under concurrent load
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    // 64MB page cache; the aggregate scans order_items and reviews
    sqlx::query("PRAGMA cache_size = -65536")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA temp_store = MEMORY")
        .execute(&pool)
        .await?;

    Ok(pool)
}

/// Applies every pending migration found in `migrations_path`.
pub async fn run_migrations(pool: &SqlitePool, migrations_path: &str) -> Result<(), sqlx::Error> {
    let migrator = Migrator::new(Path::new(migrations_path)).await?;
    migrator.run(pool).await?;
    Ok(())
}
