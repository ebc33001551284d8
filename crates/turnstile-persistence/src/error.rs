//! Error mapping helpers for the storage layer.

use turnstile_core::StorageError;

/// Maps a sqlx error into the storage taxonomy.
pub fn map_db_error(e: sqlx::Error) -> StorageError {
    StorageError::Database(e.to_string())
}
