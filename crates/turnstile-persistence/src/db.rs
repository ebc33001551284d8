//! SQLite pool bootstrap and schema creation.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, warn};

use turnstile_core::StorageError;

use crate::error::map_db_error;

/// Connection acquire timeout, so connection storms fail fast.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

static MEMDB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opens (creating if missing) the database at `path` and ensures the
/// schema exists.
pub async fn connect(path: impl AsRef<Path>) -> Result<SqlitePool, StorageError> {
    let path = path.as_ref();

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create database directory");
            }
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(map_db_error)?;

    // WAL lets gating reads proceed while a write is in progress
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(map_db_error)?;

    init_schema(&pool).await?;

    info!(path = %path.display(), "Database connected");
    Ok(pool)
}

/// Opens a uniquely named in-memory database for tests.
///
/// Each call gets its own database; a plain `:memory:` URI is shared
/// across connections and collides in parallel tests.
pub async fn connect_in_memory() -> Result<SqlitePool, StorageError> {
    let id = MEMDB_COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!(
        "file:turnstile-memdb-{}-{}?mode=memory&cache=shared",
        std::process::id(),
        id
    );

    let options = SqliteConnectOptions::new()
        .filename(&uri)
        .shared_cache(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(map_db_error)?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Creates the tables if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscription_targets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            chat_ref TEXT NOT NULL,
            join_link TEXT NOT NULL,
            is_open INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tg_id INTEGER NOT NULL UNIQUE,
            username TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            is_chat_blocked INTEGER NOT NULL DEFAULT 0,
            registered_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory_creates_schema() {
        let pool = connect_in_memory().await.unwrap();

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscription_targets")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_creates_file_and_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bot.db");

        let pool = connect(&path).await.unwrap();
        drop(pool);

        assert!(path.exists());
    }
}
