// SQLite connection setup and schema creation
use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::RepositoryError;

/// Destination tables, applied once on a fresh store.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/sqlite/migrations");

/// The migration is single threaded; one connection is all it ever uses.
const MAX_CONNECTIONS: u32 = 1;

/// Opens (creating if needed) the destination store at `path`.
pub async fn connect(path: &Path) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the destination tables.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    info!("Creating destination tables");
    MIGRATOR.run(pool).await?;
    Ok(())
}
