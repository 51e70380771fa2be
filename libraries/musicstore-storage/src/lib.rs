//! Music Store Storage
//!
//! `SQLite` persistence for the Music Store catalog and shopping carts.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and row mapping
//! - **Explicit Relations**: Genre/artist data is joined by the query that needs it
//! - **Caller-Owned Transactions**: Cart mutations run on a connection the caller
//!   commits, so an aborted request rolls its write back
//!
//! # Example
//!
//! ```rust,no_run
//! use musicstore_storage::LocalStorageContext;
//! use musicstore_core::CatalogStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = musicstore_storage::open("sqlite://musicstore.db").await?;
//! let storage = LocalStorageContext::new(pool);
//!
//! let genres = storage.get_all_genres().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod cart_items;
pub mod genres;

// Sample catalog
pub mod seed;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://musicstore.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal) // Use WAL mode for better concurrency
        .busy_timeout(std::time::Duration::from_secs(30)); // Wait up to 30s for locks

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("Pool created");

    Ok(pool)
}

/// Create a pool and bring its schema up to date
pub async fn open(database_url: &str) -> Result<SqlitePool, StorageError> {
    let pool = create_pool(database_url)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;

    Ok(pool)
}
