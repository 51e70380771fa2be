/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Core error raised by a slice
    #[error(transparent)]
    Store(#[from] musicstore_core::StoreError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for musicstore_core::StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Store(inner) => inner,
            other => musicstore_core::StoreError::storage(other.to_string()),
        }
    }
}
