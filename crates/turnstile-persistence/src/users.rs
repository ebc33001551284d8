//! SQLite user store.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::instrument;

use turnstile_core::{NewUser, StorageError, User};

use crate::error::map_db_error;

/// Database row for a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    tg_id: i64,
    username: String,
    is_admin: bool,
    is_chat_blocked: bool,
    registered_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            tg_id: row.tg_id,
            username: row.username,
            is_admin: row.is_admin,
            is_chat_blocked: row.is_chat_blocked,
            registered_at: row.registered_at,
        }
    }
}

/// SQLite-backed user store.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Create a new user store over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Registers a user, refreshing the username on repeat contact.
    #[instrument(skip(self))]
    pub async fn upsert(&self, user: &NewUser) -> Result<User, StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (tg_id, username, registered_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(tg_id) DO UPDATE SET username = excluded.username
            "#,
        )
        .bind(user.tg_id)
        .bind(&user.username)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        let row = self.fetch_by_tg_id(user.tg_id).await?;
        row.ok_or_else(|| StorageError::NotFound {
            kind: "user".to_string(),
            id: user.tg_id.to_string(),
        })
    }

    /// Looks up a user by Telegram id.
    #[instrument(skip(self))]
    pub async fn find_by_tg_id(&self, tg_id: i64) -> Result<Option<User>, StorageError> {
        self.fetch_by_tg_id(tg_id).await
    }

    /// Sets or clears the blocked flag.
    #[instrument(skip(self))]
    pub async fn set_blocked(&self, tg_id: i64, blocked: bool) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_chat_blocked = ?2
            WHERE tg_id = ?1
            "#,
        )
        .bind(tg_id)
        .bind(blocked)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                kind: "user".to_string(),
                id: tg_id.to_string(),
            });
        }

        Ok(())
    }

    async fn fetch_by_tg_id(&self, tg_id: i64) -> Result<Option<User>, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, tg_id, username, is_admin, is_chat_blocked, registered_at
            FROM users
            WHERE tg_id = ?1
            "#,
        )
        .bind(tg_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    async fn store() -> SqliteUserStore {
        SqliteUserStore::new(connect_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_upsert_registers_new_user() {
        let store = store().await;

        let user = store.upsert(&NewUser::new(100, "alice")).await.unwrap();
        assert_eq!(user.tg_id, 100);
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
        assert!(!user.is_chat_blocked);
    }

    #[tokio::test]
    async fn test_upsert_refreshes_username_without_duplicating() {
        let store = store().await;

        let first = store.upsert(&NewUser::new(100, "alice")).await.unwrap();
        let second = store.upsert(&NewUser::new(100, "alice_renamed")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.username, "alice_renamed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_find_missing_user_returns_none() {
        let store = store().await;
        assert!(store.find_by_tg_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_blocked_roundtrip() {
        let store = store().await;
        store.upsert(&NewUser::new(100, "alice")).await.unwrap();

        store.set_blocked(100, true).await.unwrap();
        let user = store.find_by_tg_id(100).await.unwrap().unwrap();
        assert!(user.is_chat_blocked);

        store.set_blocked(100, false).await.unwrap();
        let user = store.find_by_tg_id(100).await.unwrap().unwrap();
        assert!(!user.is_chat_blocked);
    }

    #[tokio::test]
    async fn test_set_blocked_missing_user_errors() {
        let store = store().await;
        let result = store.set_blocked(404, true).await;
        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }
}
