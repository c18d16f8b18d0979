//! SQLite connection pool setup.
//!
//! The database lives in a single file (or in memory for tests). WAL mode
//! keeps concurrent reads cheap while the API handles writes.

pub mod schema;

pub use schema::initialize_database;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::Result;

/// Build connection options shared by migration and application connections.
fn connect_options(database_url: &str) -> std::result::Result<SqliteConnectOptions, sqlx::Error> {
    SqliteConnectOptions::from_str(database_url).map(|opts| {
        opts.create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
    })
}

/// Create and initialize a database connection pool.
///
/// Migrations run on a dedicated single-connection pool that is closed
/// before the application pool is created, so every application
/// connection is opened against the final schema.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    log::info!("Creating database connection pool for {}", database_url);

    // Ensure the parent directory exists for file-backed databases.
    if let Some(file) = database_url.strip_prefix("sqlite://") {
        let file = file.split('?').next().unwrap_or(file);
        if let Some(parent) = Path::new(file).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let migration_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(database_url)?)
        .await?;

    initialize_database(&migration_pool).await?;
    migration_pool.close().await;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options(database_url)?)
        .await?;

    log::info!("Database pool created successfully");

    Ok(pool)
}
